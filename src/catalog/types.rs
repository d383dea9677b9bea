//! Normalized catalog records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category shown in navigation menus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Absolute image URL, empty when the category has no image
    pub image: String,
    /// Menu position; lower comes first, fractions allowed
    pub order: f64,
}

/// Brand reference on a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub title: String,
    pub slug: String,
}

/// Category reference on a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub slug: String,
    pub title: String,
}

/// A label/value pair from the product specification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub label: String,
    pub value: String,
}

/// A color variant of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorVariant {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub hex: String,
}

/// Page metadata authored in the CMS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub title: String,
    pub description: String,
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub model: String,
    pub article: String,
    pub brand: Option<Brand>,
    pub price: f64,
    pub old_price: f64,
    pub rating: f64,
    pub stock: i64,
    pub description: String,
    pub is_hit: bool,
    pub is_new: bool,
    pub discount: f64,
    pub characteristics: Vec<Characteristic>,
    /// Absolute URL of the main image, empty when absent
    pub image: String,
    pub gallery: Vec<String>,
    pub category: Option<CategoryRef>,
    pub colors: Vec<ColorVariant>,
    pub meta: Meta,
}

impl Product {
    /// Brand title, empty when the product has no brand
    pub fn brand_title(&self) -> &str {
        self.brand.as_ref().map_or("", |b| b.title.as_str())
    }
}

/// Which slice of the product catalog to load
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductQuery {
    /// Every product (also the search corpus)
    All,
    /// Products flagged as bestsellers
    Hit,
    /// Products flagged as new arrivals
    New,
    /// Products in the category with this slug
    Category(String),
    /// The product with this slug
    Slug(String),
}

impl ProductQuery {
    /// CMS `where` filter for this query, if any
    pub fn where_clause(&self) -> Option<serde_json::Value> {
        match self {
            Self::All => None,
            Self::Hit => Some(serde_json::json!({ "isHit": { "equals": true } })),
            Self::New => Some(serde_json::json!({ "isNew": { "equals": true } })),
            Self::Category(slug) => {
                Some(serde_json::json!({ "category.slug": { "equals": slug } }))
            }
            Self::Slug(slug) => Some(serde_json::json!({ "slug": { "equals": slug } })),
        }
    }
}

impl fmt::Display for ProductQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "products:all"),
            Self::Hit => write!(f, "products:hit"),
            Self::New => write!(f, "products:new"),
            Self::Category(slug) => write!(f, "products:category:{}", slug),
            Self::Slug(slug) => write!(f, "products:slug:{}", slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keys_are_distinct() {
        assert_eq!(ProductQuery::All.to_string(), "products:all");
        assert_eq!(
            ProductQuery::Category("drills".to_string()).to_string(),
            "products:category:drills"
        );
        assert_ne!(
            ProductQuery::Category("x".to_string()).to_string(),
            ProductQuery::Slug("x".to_string()).to_string()
        );
    }

    #[test]
    fn where_clause_filters() {
        assert!(ProductQuery::All.where_clause().is_none());

        let hit = ProductQuery::Hit.where_clause().unwrap();
        assert_eq!(hit["isHit"]["equals"], true);

        let slug = ProductQuery::Slug("makita-df333".to_string())
            .where_clause()
            .unwrap();
        assert_eq!(slug["slug"]["equals"], "makita-df333");
    }
}
