//! CLI command implementations

pub mod categories;
pub mod config;
pub mod contact;
pub mod product;
pub mod products;
pub mod search;
pub mod sitemap;

pub use categories::execute as categories;
pub use config::execute as config;
pub use contact::execute as contact;
pub use product::execute as product;
pub use products::execute as products;
pub use search::execute as search;
pub use sitemap::execute as sitemap;

use crate::catalog::Product;
use console::style;

/// Price with the old price struck through when discounted
pub(crate) fn format_price(product: &Product) -> String {
    if product.old_price > product.price {
        format!(
            "{} ₴ {}",
            product.price,
            style(format!("{} ₴", product.old_price)).dim().strikethrough()
        )
    } else {
        format!("{} ₴", product.price)
    }
}

/// One product as a table row
pub(crate) fn print_product_row(product: &Product) {
    println!(
        "{:<28} {:<36} {:<14} {:>14}",
        product.slug,
        truncate(&product.name, 36),
        truncate(product.brand_title(), 14),
        format!("{} ₴", product.price)
    );
}

pub(crate) fn print_product_header() {
    println!(
        "{:<28} {:<36} {:<14} {:>14}",
        style("SLUG").bold(),
        style("NAME").bold(),
        style("BRAND").bold(),
        style("PRICE").bold()
    );
    println!("{}", "-".repeat(95));
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
