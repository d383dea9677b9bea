//! Products command - list a slice of the catalog

use crate::catalog::ProductQuery;
use crate::cli::args::{OutputFormat, ProductFilter, ProductsArgs};
use crate::cli::commands::{print_product_header, print_product_row};
use crate::config::Config;
use crate::error::OstrivResult;
use crate::storefront::Storefront;
use crate::ui::{self, TaskSpinner, UiContext};

impl From<&ProductFilter> for ProductQuery {
    fn from(filter: &ProductFilter) -> Self {
        if filter.hit {
            ProductQuery::Hit
        } else if filter.new {
            ProductQuery::New
        } else if let Some(slug) = &filter.category {
            ProductQuery::Category(slug.clone())
        } else {
            ProductQuery::All
        }
    }
}

/// Execute the products command
pub async fn execute(args: ProductsArgs, config: &Config) -> OstrivResult<()> {
    let storefront = Storefront::from_config(config)?;
    let query = ProductQuery::from(&args.filter);

    match args.format {
        OutputFormat::Json => {
            let products = storefront.catalog().products(&query).await;
            println!("{}", serde_json::to_string_pretty(products.as_slice())?);
        }
        OutputFormat::Plain => {
            let products = storefront.catalog().products(&query).await;
            products.iter().for_each(|p| println!("{}", p.slug));
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            let mut spinner = TaskSpinner::new(&ctx);
            spinner.start("Loading products...");
            let products = storefront.catalog().products(&query).await;

            if products.is_empty() {
                spinner.stop_warn("No products");
                ui::remark(&ctx, "The CMS may be unreachable; run with -v for details");
                return Ok(());
            }
            spinner.stop(&format!("{} products", products.len()));

            println!();
            print_product_header();
            products.iter().for_each(print_product_row);
        }
    }

    Ok(())
}
