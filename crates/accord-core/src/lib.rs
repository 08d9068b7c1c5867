//! Accord Core Library
//!
//! Core types, configuration, and error handling for the Accord
//! crawl-surface generator.

pub mod config;
pub mod env;
pub mod error;
pub mod resolver;

pub use config::Config;
pub use error::{CoreError, Result};
pub use resolver::{SiteUrlResolver, DEFAULT_SITE_URL};
