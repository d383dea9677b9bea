//! Error types for Ostriv
//!
//! All modules use `OstrivResult<T>` as their return type.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for Ostriv operations
pub type OstrivResult<T> = Result<T, OstrivError>;

/// All errors that can occur in Ostriv
#[derive(Error, Debug)]
pub enum OstrivError {
    // CMS errors
    #[error("CMS unreachable at {url}: {reason}")]
    CmsUnreachable { url: String, reason: String },

    #[error("CMS returned HTTP {status} for {url}")]
    CmsStatus { url: String, status: u16 },

    #[error("CMS GraphQL error: {0}")]
    CmsGraphql(String),

    #[error("Malformed CMS response: {0}")]
    CmsDecode(String),

    #[error("CMS URL {url} points at the storefront itself")]
    CmsOriginLoop { url: String },

    #[error("Invalid URL {url}: {reason}")]
    UrlInvalid { url: String, reason: String },

    // Catalog errors
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// An error delivered to every waiter of a shared fetch
    #[error("{0}")]
    Shared(Arc<OstrivError>),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl OstrivError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an unreachable-CMS error
    pub fn unreachable(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::CmsUnreachable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Unwrap shared errors down to the error that was originally raised
    pub fn root(&self) -> &OstrivError {
        match self {
            Self::Shared(inner) => inner.root(),
            other => other,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root(),
            Self::CmsUnreachable { .. } | Self::CmsStatus { status: 500..=599, .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self.root() {
            Self::CmsOriginLoop { .. } => {
                Some("Set cms.url (or OSTRIV_CMS_URL) to the CMS address, not the storefront")
            }
            Self::CmsUnreachable { .. } => Some("Check the CMS URL with: ostriv config show"),
            Self::ConfigInvalid { .. } => Some("Regenerate defaults with: ostriv config init --force"),
            _ => None,
        }
    }
}
