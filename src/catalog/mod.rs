//! Catalog domain: categories, products and their cached access

pub mod defaults;
pub mod normalize;
pub mod ordering;
pub mod service;
pub mod sitemap;
pub mod types;

pub use ordering::{order_by_rank, Ranked};
pub use service::{Catalog, CATEGORIES_KEY};
pub use types::{Category, Product, ProductQuery};
