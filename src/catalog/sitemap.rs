//! Sitemap generation

use crate::catalog::service::Catalog;
use crate::catalog::types::{Product, ProductQuery};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Public pages that are always listed
pub const STATIC_ROUTES: &[&str] = &[
    "/",
    "/catalog",
    "/about",
    "/contact",
    "/delivery",
    "/cart",
    "/checkout",
    "/wishlist",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
}

/// Static pages followed by one entry per product with a slug
pub fn entries(site_url: &str, products: &[Product], generated_at: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = site_url.trim_end_matches('/');
    let entry = |path: String| SitemapEntry {
        url: format!("{}{}", base, path),
        last_modified: generated_at,
    };

    STATIC_ROUTES
        .iter()
        .map(|route| entry(route.to_string()))
        .chain(
            products
                .iter()
                .filter(|p| !p.slug.is_empty())
                .map(|p| entry(format!("/product/{}", p.slug))),
        )
        .collect()
}

/// Build the sitemap from the catalog's full product list
///
/// Products that cannot be loaded leave only the static pages.
pub async fn build(catalog: &Catalog, site_url: &str, generated_at: DateTime<Utc>) -> Vec<SitemapEntry> {
    let products = catalog.products(&ProductQuery::All).await;
    entries(site_url, &products, generated_at)
}

/// Render entries as a sitemap XML document
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
