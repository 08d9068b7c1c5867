//! Robots.txt generation.
//!
//! Emits the crawl policy for search engine crawlers: a static allow rule
//! plus the absolute sitemap location. Pure function of the resolved base
//! URL; no dependency on the resource provider.

use std::{fs::File, io::Write, path::Path};

use thiserror::Error;
use tracing::info;

use accord_core::{config::RobotsConfig, SiteUrlResolver};

/// Robots generation errors.
#[derive(Debug, Error)]
pub enum RobotsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for robots generation.
pub type Result<T> = std::result::Result<T, RobotsError>;

/// The crawl policy exposed to crawlers. Computed fresh per invocation;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlPolicy {
    /// Agent the rules apply to.
    pub user_agent: String,

    /// Path pattern crawlers may visit.
    pub allow: String,

    /// Absolute URL of the sitemap.
    pub sitemap_url: String,
}

/// Robots.txt generator.
#[derive(Debug, Clone)]
pub struct RobotsGenerator {
    base_url: String,
    rules: RobotsConfig,
}

impl RobotsGenerator {
    /// Create a generator over an already-resolved base URL with default
    /// rules (all agents, allow everything).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rules: RobotsConfig::default(),
        }
    }

    /// Create a generator by resolving the base URL once.
    #[must_use]
    pub fn from_resolver(resolver: &SiteUrlResolver) -> Self {
        Self::new(resolver.resolve())
    }

    /// Use configured allow/disallow rules instead of the defaults.
    #[must_use]
    pub fn with_rules(mut self, rules: RobotsConfig) -> Self {
        self.rules = rules;
        self
    }

    /// The crawl policy derived from the base URL.
    #[must_use]
    pub fn policy(&self) -> CrawlPolicy {
        CrawlPolicy {
            user_agent: "*".to_string(),
            allow: "/".to_string(),
            sitemap_url: format!("{}/sitemap.xml", self.base_url),
        }
    }

    /// Render the robots.txt document.
    #[must_use]
    pub fn generate(&self) -> String {
        let policy = self.policy();
        let mut out = String::new();

        out.push_str(&format!("User-agent: {}\n", policy.user_agent));

        for path in &self.rules.disallow {
            out.push_str(&format!("Disallow: {path}\n"));
        }

        for path in &self.rules.allow {
            out.push_str(&format!("Allow: {path}\n"));
        }

        out.push_str(&format!("Sitemap: {}\n", policy.sitemap_url));
        out
    }

    /// Write robots.txt into the output directory.
    pub fn write_to(&self, output_dir: &Path) -> Result<()> {
        if !self.rules.enabled {
            return Ok(());
        }

        info!("generating robots.txt");

        let path = output_dir.join("robots.txt");
        let mut file = File::create(path)?;
        file.write_all(self.generate().as_bytes())?;

        Ok(())
    }
}
