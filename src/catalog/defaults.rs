//! Built-in category list served when the CMS has never answered

use crate::catalog::types::Category;
use crate::cms::images::ImageResolver;

/// `(slug, title, image path, order)`
const DEFAULT_CATEGORIES: &[(&str, &str, &str, f64)] = &[
    ("power-tools", "Електроінструмент", "/media/categories/power-tools.webp", 1.0),
    ("hand-tools", "Ручний інструмент", "/media/categories/hand-tools.webp", 2.0),
    ("garden", "Садова техніка", "/media/categories/garden.webp", 3.0),
    ("generators", "Генератори", "/media/categories/generators.webp", 4.0),
    ("welding", "Зварювальне обладнання", "/media/categories/welding.webp", 5.0),
    ("compressors", "Компресори", "/media/categories/compressors.webp", 6.0),
    ("consumables", "Витратні матеріали", "/media/categories/consumables.webp", 7.0),
];

/// The built-in categories with images resolved through `images`
pub fn default_categories(images: &dyn ImageResolver) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|&(slug, title, image, order)| Category {
            id: slug.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            image: images.resolve(Some(image)),
            order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::images::CmsImageResolver;
    use std::collections::HashSet;

    #[test]
    fn defaults_are_complete() {
        let categories = default_categories(&CmsImageResolver::new("https://cms.example"));

        assert!(!categories.is_empty());
        let slugs: HashSet<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs.len(), categories.len());
        for category in &categories {
            assert!(!category.title.is_empty());
            assert!(category.image.starts_with("https://cms.example/media/"));
        }
    }
}
