//! Substring matching over the product corpus

use crate::catalog::types::Product;

/// Text a query is matched against: name, model and brand
pub fn haystack(product: &Product) -> String {
    format!("{} {} {}", product.name, product.model, product.brand_title()).to_lowercase()
}

/// The first `max` products whose name, model or brand contains `query`
///
/// Matching is case-insensitive and keeps corpus order.
pub fn suggest(products: &[Product], query: &str, max: usize) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| haystack(product).contains(&needle))
        .take(max)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize;
    use crate::cms::images::CmsImageResolver;
    use serde_json::json;

    fn products(docs: serde_json::Value) -> Vec<Product> {
        let raw = serde_json::from_value(docs).unwrap();
        normalize::products(raw, &CmsImageResolver::new("https://cms.test"))
    }

    #[test]
    fn matches_name_model_and_brand() {
        let corpus = products(json!([
            { "id": "1", "name": "Дриль ударний", "model": "HP1630" },
            { "id": "2", "name": "Saw", "model": "X", "brand": { "id": "b", "title": "Makita", "slug": "makita" } },
            { "id": "3", "name": "Generator", "model": "EU22i" }
        ]));

        let ids = |found: Vec<Product>| found.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(suggest(&corpus, "ДРИЛЬ", 8)), vec!["1"]);
        assert_eq!(ids(suggest(&corpus, "hp16", 8)), vec!["1"]);
        assert_eq!(ids(suggest(&corpus, "makita", 8)), vec!["2"]);
        assert_eq!(ids(suggest(&corpus, "saw x", 8)), vec!["2"]);
        assert!(suggest(&corpus, "nothing", 8).is_empty());
    }

    #[test]
    fn caps_suggestions_in_corpus_order() {
        let docs: Vec<_> = (0..20)
            .map(|i| json!({ "id": i.to_string(), "name": format!("Drill {}", i) }))
            .collect();
        let corpus = products(serde_json::Value::Array(docs));

        let found = suggest(&corpus, "drill", 8);

        assert_eq!(found.len(), 8);
        assert_eq!(found[0].id, "0");
        assert_eq!(found[7].id, "7");
    }
}
