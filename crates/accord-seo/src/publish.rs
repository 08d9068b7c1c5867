//! Publish orchestration.
//!
//! Coordinates one generation run: resolve the base URL once, fetch the
//! resource records once, then write `sitemap.xml` and `robots.txt` to the
//! output directory. A run is an independent, stateless computation; a
//! provider failure fails the run as a whole and nothing is emitted for it.

use std::{fs, path::Path, time::Instant};

use thiserror::Error;
use tracing::{debug, info};

use accord_core::{Config, SiteUrlResolver};

use crate::{
    provider::ResourceProvider,
    robots::{RobotsError, RobotsGenerator},
    sitemap::{self, SitemapError, SitemapGenerator},
};

/// Publish errors.
#[derive(Debug, Error)]
pub enum PublishError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Robots generation error.
    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Publish statistics.
#[derive(Debug, Clone, Default)]
pub struct PublishStats {
    /// Number of routes in the emitted sitemap.
    pub routes: usize,

    /// Whether robots.txt was written.
    pub robots: bool,

    /// Publish duration in milliseconds.
    pub duration_ms: u64,
}

/// Publisher that orchestrates one generation run.
#[derive(Debug)]
pub struct Publisher {
    config: Config,
    site_url_override: Option<String>,
}

impl Publisher {
    /// Create a publisher over a loaded configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            site_url_override: None,
        }
    }

    /// Supply the raw environment base-URL override, read once at process
    /// start. Takes precedence over the configured `site.base_url`.
    #[must_use]
    pub fn with_site_url_override(mut self, raw: Option<String>) -> Self {
        self.site_url_override = raw;
        self
    }

    /// Execute one publish run.
    pub async fn publish<P>(&self, provider: &P, output_dir: &Path) -> Result<PublishStats>
    where
        P: ResourceProvider + ?Sized,
    {
        let start = Instant::now();

        let resolver = SiteUrlResolver::new(
            self.site_url_override
                .clone()
                .or_else(|| Some(self.config.site.base_url.clone())),
        );
        let base_url = resolver.resolve();

        info!(
            base_url = %base_url,
            output = %output_dir.display(),
            "starting publish"
        );

        fs::create_dir_all(output_dir)?;

        let generator = SitemapGenerator::new(&base_url);
        let entries = generator.generate(provider).await?;

        let sitemap_path = output_dir.join("sitemap.xml");
        let mut file = fs::File::create(&sitemap_path)?;
        sitemap::write_to(&entries, &mut file)?;
        debug!(path = %sitemap_path.display(), routes = entries.len(), "wrote sitemap");

        let robots = self.config.robots.enabled;
        if robots {
            RobotsGenerator::new(&base_url)
                .with_rules(self.config.robots.clone())
                .write_to(output_dir)?;
        }

        let stats = PublishStats {
            routes: entries.len(),
            robots,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            routes = stats.routes,
            robots = stats.robots,
            duration_ms = stats.duration_ms,
            "publish complete"
        );

        Ok(stats)
    }
}
