//! Configuration schema for Ostriv
//!
//! Configuration is stored at `~/.config/ostriv/config.toml`

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback CMS address used when nothing else is configured
pub const DEFAULT_CMS_URL: &str = "http://ostriv-backend-pss7wq-99f886-46-175-148-52.traefik.me";

/// Public storefront address
pub const DEFAULT_SITE_URL: &str = "https://ostrowtor.net";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// CMS connection settings
    pub cms: CmsConfig,

    /// Storefront settings
    pub site: SiteConfig,

    /// Catalog cache settings
    pub cache: CacheConfig,

    /// Search suggestion settings
    pub search: SearchConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Explicit CMS base URL (takes precedence over the environment)
    pub url: Option<String>,

    /// Base URL used when neither config nor environment name one
    pub default_url: String,

    /// GraphQL endpoint path relative to the base URL
    pub graphql_path: String,

    /// Request timeout in seconds (0 = transport default)
    pub timeout_secs: u64,

    /// Maximum number of documents requested per query
    pub page_limit: u32,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: None,
            default_url: DEFAULT_CMS_URL.to_string(),
            graphql_path: "/api/graphql".to_string(),
            timeout_secs: 15,
            page_limit: 100,
        }
    }
}

impl CmsConfig {
    /// Request timeout, `None` when left to the transport
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Storefront settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin of the storefront
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

/// Catalog cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a freshly fetched entry
    pub ttl_secs: u64,

    /// Lifetime of a fallback entry served after a failed refresh
    pub degraded_ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn degraded_ttl(&self) -> Duration {
        Duration::from_secs(self.degraded_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            degraded_ttl_secs: 30,
        }
    }
}

/// Search suggestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Idle time after the last keystroke before a lookup runs
    pub quiet_period_ms: u64,

    /// Maximum number of suggestions shown
    pub max_suggestions: usize,
}

impl SearchConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: 200,
            max_suggestions: 8,
        }
    }
}
