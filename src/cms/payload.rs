//! Raw document shapes returned by the CMS
//!
//! Every field is optional: the CMS returns `null` for anything an editor
//! left blank, and whole documents may be `null` when access rules hide them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept ids stored either as strings or as numbers
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `{ docs: [...] }` wrapper around a collection query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Docs<T> {
    #[serde(default)]
    pub docs: Option<Vec<Option<T>>>,
}

impl<T> Docs<T> {
    /// Documents with `null` entries removed
    pub fn into_docs(self) -> Vec<T> {
        self.docs.unwrap_or_default().into_iter().flatten().collect()
    }
}

/// Data of the categories query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesData {
    #[serde(rename = "Categories", default)]
    pub categories: Option<Docs<PayloadCategory>>,
}

/// Data of the products query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsData {
    #[serde(rename = "Products", default)]
    pub products: Option<Docs<PayloadProduct>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadImage {
    pub url: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadCategory {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<PayloadImage>,
    pub order: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadCharacteristic {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadColor {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub hex: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMeta {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadProduct {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub article: Option<String>,
    pub meta: Option<PayloadMeta>,
    pub brand: Option<PayloadRef>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub old_price: Option<f64>,
    pub rating: Option<f64>,
    /// Plain text or a rich-text document
    pub description: Option<Value>,
    pub is_hit: Option<bool>,
    pub is_new: Option<bool>,
    pub discount: Option<f64>,
    pub characteristics: Option<Vec<Option<PayloadCharacteristic>>>,
    pub image: Option<PayloadImage>,
    pub gallery: Option<Vec<Option<PayloadImage>>>,
    pub category: Option<PayloadRef>,
    pub colors: Option<Vec<Option<PayloadColor>>>,
}
