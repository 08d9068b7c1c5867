//! Site URL resolution.
//!
//! Every absolute link the system emits is built on the base URL resolved
//! here. Resolution never fails: an absent or comment-only configured value
//! falls back to [`DEFAULT_SITE_URL`].

use crate::env;

/// Fallback host used when no base URL is configured.
pub const DEFAULT_SITE_URL: &str = "https://tryaccord.com";

/// Resolves the canonical base URL from an optionally configured raw value.
///
/// The raw value is typically the `ACCORD_SITE_URL` environment override or
/// the `site.base_url` config entry, read once at process start and passed
/// in explicitly.
#[derive(Debug, Clone)]
pub struct SiteUrlResolver {
    configured: Option<String>,
    default_url: String,
}

impl SiteUrlResolver {
    /// Create a resolver over an optionally configured raw value.
    #[must_use]
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured,
            default_url: DEFAULT_SITE_URL.to_string(),
        }
    }

    /// Override the fallback host.
    #[must_use]
    pub fn with_default(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    /// Resolve the canonical base URL: scheme + host, no trailing slash.
    ///
    /// The configured value is cleaned of inline comments and surrounding
    /// whitespace first; when nothing usable remains, the default host is
    /// returned instead. Callers never receive an absent value.
    #[must_use]
    pub fn resolve(&self) -> String {
        self.configured
            .as_deref()
            .and_then(env::clean_value)
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.default_url.trim_end_matches('/').to_string())
    }
}
