//! CMS base URL resolution
//!
//! Precedence: explicit `cms.url` (config file or `--cms-url`), then the
//! first non-empty of `OSTRIV_CMS_URL`, `PAYLOAD_URL` and `CMS_URL`, then
//! `cms.default_url`. An explicitly configured URL that equals the
//! storefront's own origin is rejected: requests would loop back into the
//! storefront instead of reaching the CMS.

use crate::config::schema::CmsConfig;
use crate::error::{OstrivError, OstrivResult};
use tracing::debug;
use url::Url;

/// Environment variables consulted for the CMS URL, in order
pub const CMS_URL_ENV_VARS: [&str; 3] = ["OSTRIV_CMS_URL", "PAYLOAD_URL", "CMS_URL"];

/// Strip whitespace and trailing slashes
pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Where the CMS lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsEndpoint {
    base_url: String,
    graphql_path: String,
    explicit: bool,
}

impl CmsEndpoint {
    /// Resolve from config and the process environment
    pub fn resolve(config: &CmsConfig, site_origin: &str) -> OstrivResult<Self> {
        Self::resolve_with(config, site_origin, |name| std::env::var(name).ok())
    }

    /// Resolve with a custom environment lookup
    pub fn resolve_with(
        config: &CmsConfig,
        site_origin: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> OstrivResult<Self> {
        let explicit = config
            .url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                CMS_URL_ENV_VARS
                    .iter()
                    .find_map(|name| env(name).filter(|url| !url.trim().is_empty()))
            });

        let (base_url, is_explicit) = match explicit {
            Some(url) => (normalize_base_url(&url), true),
            None => (normalize_base_url(&config.default_url), false),
        };

        Url::parse(&base_url).map_err(|e| OstrivError::UrlInvalid {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        if is_explicit && base_url.eq_ignore_ascii_case(&normalize_base_url(site_origin)) {
            return Err(OstrivError::CmsOriginLoop { url: base_url });
        }

        debug!(
            "CMS endpoint: {} ({})",
            base_url,
            if is_explicit { "configured" } else { "default" }
        );

        Ok(Self {
            base_url,
            graphql_path: config.graphql_path.clone(),
            explicit: is_explicit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the URL came from config or the environment
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn graphql_url(&self) -> String {
        self.url_for(&self.graphql_path)
    }

    pub fn contact_requests_url(&self) -> String {
        self.url_for("/api/contact-requests")
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
