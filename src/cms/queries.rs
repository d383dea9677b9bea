//! GraphQL documents sent to the CMS

pub const GET_CATEGORIES: &str = r#"
query GetCategories($limit: Int = 100) {
  Categories(limit: $limit) {
    docs {
      id
      title
      slug
      order
      image {
        url
        width
        height
        alt
      }
    }
  }
}
"#;

pub const GET_PRODUCTS: &str = r#"
query GetProducts($where: Product_where, $limit: Int = 100) {
  Products(where: $where, limit: $limit) {
    docs {
      id
      slug
      name
      model
      article
      meta {
        metaTitle
        metaDescription
      }
      brand {
        id
        title
        slug
      }
      price
      stock
      oldPrice
      rating
      description
      isHit
      isNew
      discount
      characteristics {
        id
        label
        value
      }
      image {
        url
        width
        height
        alt
      }
      gallery {
        url
        width
        height
        alt
      }
      category {
        id
        slug
        title
      }
      colors {
        id
        title
        slug
        hex
      }
    }
  }
}
"#;
