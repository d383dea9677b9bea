//! Sitemap command - print the storefront sitemap

use crate::catalog::sitemap;
use crate::cli::args::{SitemapArgs, SitemapFormat};
use crate::config::Config;
use crate::error::OstrivResult;
use crate::storefront::Storefront;
use chrono::Utc;

/// Execute the sitemap command
pub async fn execute(args: SitemapArgs, config: &Config) -> OstrivResult<()> {
    let storefront = Storefront::from_config(config)?;
    let entries = sitemap::build(storefront.catalog(), storefront.site_url(), Utc::now()).await;

    match args.format {
        SitemapFormat::Xml => print!("{}", sitemap::render_xml(&entries)),
        SitemapFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}
