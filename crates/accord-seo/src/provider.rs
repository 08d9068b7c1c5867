//! Resource slug providers.
//!
//! The sitemap discovers its dynamic routes through the [`ResourceProvider`]
//! capability trait, so generation can be tested against an in-memory fake
//! and pointed at a real content source in production.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The content source could not be reached.
    #[error("content source unavailable: {0}")]
    Unavailable(String),

    /// The content source returned data that could not be parsed.
    #[error("malformed resource manifest: {0}")]
    Malformed(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// One publishable content item, as reported by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceSlugRecord {
    /// URL-safe identifier, unique within the source.
    pub slug: String,

    /// Last recorded update time, when the source tracks one.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Capability interface over the content source.
///
/// Implementations materialize the full record list before returning; no
/// ordering is guaranteed. An unreachable source must surface as
/// [`ProviderError::Unavailable`], never as a silently empty list, so the
/// caller can fail the whole generation run.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Fetch every publishable resource record in one bulk call.
    async fn fetch_resource_records(&self) -> Result<Vec<ResourceSlugRecord>>;
}

/// In-memory provider backed by a fixed record list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<ResourceSlugRecord>,
}

impl StaticProvider {
    /// Create a provider over a fixed record list.
    #[must_use]
    pub fn new(records: Vec<ResourceSlugRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ResourceProvider for StaticProvider {
    async fn fetch_resource_records(&self) -> Result<Vec<ResourceSlugRecord>> {
        Ok(self.records.clone())
    }
}

/// Provider reading records from a TOML manifest on disk.
///
/// The manifest carries `[[resources]]` tables with a `slug` and an optional
/// RFC 3339 `updated_at`.
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    resources: Vec<ResourceSlugRecord>,
}

impl ManifestProvider {
    /// Create a provider over a manifest file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResourceProvider for ManifestProvider {
    async fn fetch_resource_records(&self) -> Result<Vec<ResourceSlugRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ProviderError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;

        let manifest: Manifest =
            toml::from_str(&raw).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        debug!(
            path = %self.path.display(),
            count = manifest.resources.len(),
            "fetched resource records"
        );

        Ok(manifest.resources)
    }
}
