//! Categories command - list catalog categories in menu order

use crate::catalog::Category;
use crate::cli::args::{CategoriesArgs, OutputFormat};
use crate::config::Config;
use crate::error::OstrivResult;
use crate::storefront::Storefront;
use crate::ui::{self, TaskSpinner, UiContext};
use console::style;

/// Execute the categories command
pub async fn execute(args: CategoriesArgs, config: &Config) -> OstrivResult<()> {
    let storefront = Storefront::from_config(config)?;
    let catalog = storefront.catalog();

    if args.format != OutputFormat::Table {
        let categories = catalog.categories().await;
        return match args.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(categories.as_slice())?);
                Ok(())
            }
            _ => {
                categories.iter().for_each(|c| println!("{}", c.slug));
                Ok(())
            }
        };
    }

    let ctx = UiContext::detect();
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Loading categories...");
    let categories = catalog.categories().await;

    if catalog.categories_degraded() {
        spinner.stop_warn("CMS unavailable");
        ui::step_warn_hint(
            &ctx,
            "Showing the built-in category list",
            &format!("CMS at {}", storefront.endpoint().base_url()),
        );
    } else {
        spinner.stop(&format!("{} categories", categories.len()));
    }

    print_table(&categories);
    Ok(())
}

fn print_table(categories: &[Category]) {
    println!();
    println!(
        "{:>5}  {:<24} {:<32}",
        style("ORDER").bold(),
        style("SLUG").bold(),
        style("TITLE").bold()
    );
    println!("{}", "-".repeat(63));

    for category in categories {
        println!(
            "{:>5}  {:<24} {:<32}",
            category.order, category.slug, category.title
        );
    }
}
