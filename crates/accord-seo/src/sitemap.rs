//! Sitemap generation.
//!
//! Composes the fixed static routes with dynamically discovered resource
//! routes into one ordered list of crawl entries, and renders it as an XML
//! sitemap.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::debug;

use accord_core::SiteUrlResolver;

use crate::provider::{ProviderError, ResourceProvider};

/// Path prefix under which dynamic resource routes are published.
pub const RESOURCE_PATH_PREFIX: &str = "/resources";

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource provider could not deliver its records. The whole
    /// generation run fails; no partial sitemap is emitted.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A record carried a slug that cannot be embedded in a URL path.
    #[error("invalid resource slug: {0:?}")]
    InvalidSlug(String),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// One sitemap row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Absolute canonical URL.
    pub url: String,

    /// Last modification time. Stamped with the generation time when the
    /// underlying resource has no recorded update; never absent.
    pub last_modified: DateTime<Utc>,
}

/// Sitemap generator.
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    base_url: String,
}

impl SitemapGenerator {
    /// Create a generator over an already-resolved base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create a generator by resolving the base URL once.
    #[must_use]
    pub fn from_resolver(resolver: &SiteUrlResolver) -> Self {
        Self::new(resolver.resolve())
    }

    /// Produce the complete ordered crawl surface.
    ///
    /// Static entries (home and the resource index) come first, stamped with
    /// the generation time, followed by one entry per resource record in
    /// provider order. The generator performs no reordering or deduplication;
    /// slug uniqueness is an upstream invariant. Output length is always
    /// `2 + record count`.
    pub async fn generate<P>(&self, provider: &P) -> Result<Vec<RouteEntry>>
    where
        P: ResourceProvider + ?Sized,
    {
        let now = Utc::now();

        let mut entries = vec![
            RouteEntry {
                url: self.base_url.clone(),
                last_modified: now,
            },
            RouteEntry {
                url: format!("{}{RESOURCE_PATH_PREFIX}", self.base_url),
                last_modified: now,
            },
        ];

        let records = provider.fetch_resource_records().await?;
        debug!(count = records.len(), "generating sitemap");

        for record in records {
            validate_slug(&record.slug)?;
            entries.push(RouteEntry {
                url: format!("{}{RESOURCE_PATH_PREFIX}/{}", self.base_url, record.slug),
                last_modified: record.updated_at.unwrap_or(now),
            });
        }

        Ok(entries)
    }
}

/// Render entries as a sitemaps.org urlset document.
#[must_use]
pub fn to_xml(entries: &[RouteEntry]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write the rendered sitemap to a writer.
pub fn write_to<W: Write>(entries: &[RouteEntry], writer: &mut W) -> Result<()> {
    let xml = to_xml(entries);
    writer.write_all(xml.as_bytes())?;
    Ok(())
}

/// Reject slugs that would break out of the resource path.
fn validate_slug(slug: &str) -> Result<()> {
    let is_safe = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));

    if is_safe {
        Ok(())
    } else {
        Err(SitemapError::InvalidSlug(slug.to_string()))
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
