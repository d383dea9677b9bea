//! Image URL resolution

use url::Url;

/// Turns CMS image references into absolute URLs
pub trait ImageResolver: Send + Sync {
    /// Absolute URL for `reference`, or an empty string when there is none
    fn resolve(&self, reference: Option<&str>) -> String;
}

/// Resolves relative media paths against the CMS base URL
#[derive(Debug, Clone)]
pub struct CmsImageResolver {
    base: Option<Url>,
}

impl CmsImageResolver {
    pub fn new(base_url: &str) -> Self {
        // Join relative to the base as a directory so path prefixes survive
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).ok();
        Self { base }
    }
}

impl ImageResolver for CmsImageResolver {
    fn resolve(&self, reference: Option<&str>) -> String {
        let Some(reference) = reference.map(str::trim).filter(|r| !r.is_empty()) else {
            return String::new();
        };

        if Url::parse(reference).is_ok() {
            return reference.to_string();
        }

        self.base
            .as_ref()
            .and_then(|base| base.join(reference.trim_start_matches('/')).ok())
            .map(String::from)
            .unwrap_or_default()
    }
}
