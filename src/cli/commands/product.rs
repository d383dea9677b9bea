//! Product command - show one product

use crate::catalog::Product;
use crate::cli::args::{OutputFormat, ProductArgs};
use crate::cli::commands::format_price;
use crate::config::Config;
use crate::error::OstrivResult;
use crate::navigation::Destination;
use crate::storefront::Storefront;
use crate::ui::{self, UiContext};

/// Execute the product command
pub async fn execute(args: ProductArgs, config: &Config) -> OstrivResult<()> {
    let storefront = Storefront::from_config(config)?;
    let product = storefront.catalog().product_by_slug(&args.slug).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&product)?),
        OutputFormat::Plain => println!("{}\t{}\t{}", product.slug, product.name, product.price),
        OutputFormat::Table => {
            let url = format!(
                "{}{}",
                storefront.site_url().trim_end_matches('/'),
                Destination::Product(product.slug.clone()).path()
            );
            print_details(&UiContext::detect(), &product, &url);
        }
    }

    Ok(())
}

fn print_details(ctx: &UiContext, product: &Product, url: &str) {
    ui::intro(ctx, &product.name);

    ui::key_value(ctx, "Model", &product.model);
    ui::key_value(ctx, "Article", &product.article);
    ui::key_value(ctx, "Brand", product.brand_title());
    if let Some(category) = &product.category {
        ui::key_value(ctx, "Category", &category.title);
    }
    ui::key_value(ctx, "Price", &format_price(product));
    ui::key_value(ctx, "In stock", &product.stock.to_string());
    if product.rating > 0.0 {
        ui::key_value(ctx, "Rating", &format!("{:.1}", product.rating));
    }
    ui::key_value(ctx, "Page", url);

    let badges: Vec<&str> = [(product.is_hit, "hit"), (product.is_new, "new")]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect();
    if !badges.is_empty() {
        ui::remark(ctx, &badges.join(", "));
    }

    if !product.characteristics.is_empty() {
        ui::section(ctx, "Characteristics");
        for characteristic in &product.characteristics {
            ui::key_value(ctx, &characteristic.label, &characteristic.value);
        }
    }

    if !product.description.is_empty() {
        ui::section(ctx, "Description");
        println!("{}", product.description);
    }
}
