//! Conversion of raw CMS documents into catalog records
//!
//! Missing text becomes an empty string and missing numbers become zero.
//! Documents that cannot be identified at all are dropped.

use crate::catalog::types::{
    Brand, Category, CategoryRef, Characteristic, ColorVariant, Meta, Product,
};
use crate::cms::images::ImageResolver;
use crate::cms::payload::{PayloadCategory, PayloadImage, PayloadProduct, PayloadRef};
use serde_json::Value;

fn image_url(images: &dyn ImageResolver, image: Option<&PayloadImage>) -> String {
    images.resolve(image.and_then(|i| i.url.as_deref()))
}

/// Normalize a category; ids fall back to the slug, then the title
pub fn category(raw: PayloadCategory, images: &dyn ImageResolver) -> Category {
    let image = image_url(images, raw.image.as_ref());
    let id = raw
        .id
        .or_else(|| raw.slug.clone())
        .or_else(|| raw.title.clone())
        .unwrap_or_default();

    Category {
        id,
        title: raw.title.unwrap_or_default(),
        slug: raw.slug.unwrap_or_default(),
        image,
        order: raw.order.unwrap_or(0.0),
    }
}

pub fn categories(raw: Vec<PayloadCategory>, images: &dyn ImageResolver) -> Vec<Category> {
    raw.into_iter().map(|c| category(c, images)).collect()
}

fn reference(raw: PayloadRef) -> (String, String, String) {
    (
        raw.id.unwrap_or_default(),
        raw.title.unwrap_or_default(),
        raw.slug.unwrap_or_default(),
    )
}

/// Flatten a description that is either plain text or a rich-text tree
fn description_text(value: Option<Value>) -> String {
    fn collect(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) if !s.is_empty() => out.push(s.clone()),
            Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
            Value::Object(map) => {
                if let Some(Value::String(text)) = map.get("text") {
                    if !text.is_empty() {
                        out.push(text.clone());
                    }
                }
                for key in ["root", "children"] {
                    if let Some(child) = map.get(key) {
                        collect(child, out);
                    }
                }
            }
            _ => {}
        }
    }

    match value {
        Some(Value::String(text)) => text,
        Some(other) => {
            let mut parts = Vec::new();
            collect(&other, &mut parts);
            parts.join(" ")
        }
        None => String::new(),
    }
}

/// Normalize a product; products without both id and slug are dropped
pub fn product(raw: PayloadProduct, images: &dyn ImageResolver) -> Option<Product> {
    if raw.id.is_none() && raw.slug.is_none() {
        return None;
    }

    let image = image_url(images, raw.image.as_ref());
    let gallery = raw
        .gallery
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|img| image_url(images, Some(&img)))
        .filter(|url| !url.is_empty())
        .collect();

    let characteristics = raw
        .characteristics
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|c| Characteristic {
            label: c.label.unwrap_or_default(),
            value: c.value.unwrap_or_default(),
        })
        .filter(|c| !c.label.is_empty())
        .collect();

    let colors = raw
        .colors
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|c| ColorVariant {
            id: c.id.unwrap_or_default(),
            title: c.title.unwrap_or_default(),
            slug: c.slug.unwrap_or_default(),
            hex: c.hex.unwrap_or_default(),
        })
        .collect();

    let brand = raw.brand.map(reference).map(|(id, title, slug)| Brand { id, title, slug });
    let category = raw
        .category
        .map(reference)
        .map(|(id, title, slug)| CategoryRef { id, slug, title });
    let meta = raw
        .meta
        .map(|m| Meta {
            title: m.meta_title.unwrap_or_default(),
            description: m.meta_description.unwrap_or_default(),
        })
        .unwrap_or_default();

    let slug = raw.slug.unwrap_or_default();
    Some(Product {
        id: raw.id.unwrap_or_else(|| slug.clone()),
        slug,
        name: raw.name.unwrap_or_default(),
        model: raw.model.unwrap_or_default(),
        article: raw.article.unwrap_or_default(),
        brand,
        price: raw.price.unwrap_or(0.0),
        old_price: raw.old_price.unwrap_or(0.0),
        rating: raw.rating.unwrap_or(0.0),
        stock: raw.stock.map_or(0, |s| s as i64),
        description: description_text(raw.description),
        is_hit: raw.is_hit.unwrap_or(false),
        is_new: raw.is_new.unwrap_or(false),
        discount: raw.discount.unwrap_or(0.0),
        characteristics,
        image,
        gallery,
        category,
        colors,
        meta,
    })
}

/// Normalize a batch of products, dropping unusable ones
pub fn products(raw: Vec<PayloadProduct>, images: &dyn ImageResolver) -> Vec<Product> {
    raw.into_iter().filter_map(|p| product(p, images)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::images::CmsImageResolver;

    fn images() -> CmsImageResolver {
        CmsImageResolver::new("https://cms.example")
    }

    #[test]
    fn category_defaults() {
        let raw = PayloadCategory {
            slug: Some("generators".to_string()),
            ..Default::default()
        };

        let category = category(raw, &images());
        assert_eq!(category.id, "generators");
        assert_eq!(category.title, "");
        assert_eq!(category.image, "");
        assert_eq!(category.order, 0.0);
    }

    #[test]
    fn category_id_falls_back_to_title() {
        let raw = PayloadCategory {
            title: Some("Компресори".to_string()),
            order: Some(3.0),
            image: Some(PayloadImage {
                url: Some("/api/media/file/compressors.png".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let category = category(raw, &images());
        assert_eq!(category.id, "Компресори");
        assert_eq!(category.order, 3.0);
        assert_eq!(
            category.image,
            "https://cms.example/api/media/file/compressors.png"
        );
    }

    #[test]
    fn category_keeps_fractional_order() {
        let raw = PayloadCategory {
            slug: Some("welding".to_string()),
            order: Some(1.5),
            ..Default::default()
        };

        assert_eq!(category(raw, &images()).order, 1.5);
    }

    #[test]
    fn product_defaults() {
        let raw = PayloadProduct {
            id: Some("p1".to_string()),
            ..Default::default()
        };

        let product = product(raw, &images()).unwrap();
        assert_eq!(product.slug, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 0);
        assert!(!product.is_hit);
        assert!(product.brand.is_none());
        assert_eq!(product.brand_title(), "");
        assert!(product.gallery.is_empty());
    }

    #[test]
    fn unidentifiable_product_is_dropped() {
        let raw = vec![
            PayloadProduct {
                name: Some("Orphan".to_string()),
                ..Default::default()
            },
            PayloadProduct {
                slug: Some("makita-df333".to_string()),
                ..Default::default()
            },
        ];

        let products = products(raw, &images());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "makita-df333");
    }

    #[test]
    fn product_nested_fields() {
        let raw: PayloadProduct = serde_json::from_value(serde_json::json!({
            "id": 7,
            "slug": "bosch-gsr",
            "name": "Шуруповерт",
            "brand": {"id": 1, "title": "Bosch", "slug": "bosch"},
            "gallery": [null, {"url": "/media/a.png"}, {"url": null}],
            "characteristics": [{"label": "Напруга", "value": "18 В"}, {"label": null}],
            "colors": [{"id": "c", "title": "Синій", "slug": "blue", "hex": "#00f"}],
            "description": {"root": {"children": [
                {"children": [{"text": "Потужний"}, {"text": "інструмент"}]}
            ]}}
        }))
        .unwrap();

        let product = product(raw, &images()).unwrap();
        assert_eq!(product.id, "7");
        assert_eq!(product.brand_title(), "Bosch");
        assert_eq!(product.gallery, vec!["https://cms.example/media/a.png"]);
        assert_eq!(product.characteristics.len(), 1);
        assert_eq!(product.colors[0].hex, "#00f");
        assert_eq!(product.description, "Потужний інструмент");
    }

    #[test]
    fn plain_description_kept() {
        assert_eq!(
            description_text(Some(Value::String("Text".to_string()))),
            "Text"
        );
        assert_eq!(description_text(None), "");
    }
}
