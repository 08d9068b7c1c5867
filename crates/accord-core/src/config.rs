//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    resolver::DEFAULT_SITE_URL,
};

/// Main configuration structure for Accord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Robots policy settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated crawl artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Resource manifest file consumed by the manifest provider.
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

/// Robots policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsConfig {
    /// Whether robots.txt generation is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Paths crawlers are allowed to visit.
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,

    /// Paths crawlers must not visit (e.g. the authenticated dashboard).
    #[serde(default)]
    pub disallow: Vec<String>,
}

// Default value functions
fn default_output_dir() -> String {
    "public".to_string()
}

fn default_manifest() -> String {
    "resources.toml".to_string()
}

fn default_true() -> bool {
    true
}

fn default_allow() -> Vec<String> {
    vec!["/".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Accord".to_string(),
            base_url: DEFAULT_SITE_URL.to_string(),
            description: None,
            author: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            manifest: default_manifest(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow: default_allow(),
            disallow: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            build: BuildConfig::default(),
            robots: RobotsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, merging `ACCORD`-prefixed
    /// environment variables over the file values.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("ACCORD").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, a conventional `accord.toml`
    /// in the working directory, or fall back to defaults. File values are
    /// merged with `ACCORD`-prefixed environment variables.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_with_env(path);
        }

        let conventional = Path::new("accord.toml");
        if conventional.exists() {
            return Self::load_with_env(conventional);
        }

        Ok(Self::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Accord"
base_url = "https://example.com"
description = "Resolve conflicts with confidence"

[build]
output_dir = "dist"
manifest = "content/resources.toml"

[robots]
disallow = ["/war-room", "/vault"]
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Accord");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.build.output_dir, "dist");
        assert_eq!(config.build.manifest, "content/resources.toml");
        assert!(config.robots.enabled);
        assert_eq!(config.robots.allow, vec!["/"]);
        assert_eq!(config.robots.disallow, vec!["/war-room", "/vault"]);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.build.output_dir, "public");
        assert_eq!(config.build.manifest, "resources.toml");
        assert!(config.robots.enabled);
        assert!(config.robots.disallow.is_empty());
    }

    #[test]
    fn test_url_for() {
        let config = Config {
            site: SiteConfig {
                base_url: "https://example.com".to_string(),
                ..SiteConfig::default()
            },
            ..Config::default()
        };

        assert_eq!(
            config.url_for("/resources/hello"),
            "https://example.com/resources/hello"
        );
        assert_eq!(
            config.url_for("resources/hello"),
            "https://example.com/resources/hello"
        );
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/accord.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        std::fs::write(&config_path, "not valid toml [[[").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config file")
        );
    }

    #[test]
    fn test_load_with_env_merges_environment() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        std::env::set_var("ACCORD__SITE__TITLE", "Accord Staging");
        let config = Config::load_with_env(&config_path).expect("load config");
        std::env::remove_var("ACCORD__SITE__TITLE");

        // Environment wins over the file value.
        assert_eq!(config.site.title, "Accord Staging");
        assert_eq!(config.site.base_url, "https://example.com");
    }

    #[test]
    fn test_load_with_env_not_found() {
        let result = Config::load_with_env(Path::new("/nonexistent/accord.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_or_default_merges_environment() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("accord.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        std::env::set_var("ACCORD__BUILD__OUTPUT_DIR", "staging-public");
        let config = Config::load_or_default(Some(&config_path)).expect("load config");
        std::env::remove_var("ACCORD__BUILD__OUTPUT_DIR");

        assert_eq!(config.build.output_dir, "staging-public");
        assert_eq!(config.build.manifest, "content/resources.toml");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Config::load_or_default(None).expect("defaults load");
        assert_eq!(config.site.base_url, DEFAULT_SITE_URL);
    }
}
