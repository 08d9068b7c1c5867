//! Accord SEO Library
//!
//! Crawl-surface generation for the Accord site.
//!
//! # Modules
//!
//! - [`provider`] - Resource slug provider contract and implementations
//! - [`sitemap`] - Sitemap generation over static and dynamic routes
//! - [`robots`] - Robots.txt crawl policy
//! - [`publish`] - Publish orchestration

pub mod provider;
pub mod publish;
pub mod robots;
pub mod sitemap;

pub use provider::{
    ManifestProvider, ProviderError, ResourceProvider, ResourceSlugRecord, StaticProvider,
};
pub use publish::{PublishError, PublishStats, Publisher};
pub use robots::{CrawlPolicy, RobotsError, RobotsGenerator};
pub use sitemap::{RouteEntry, SitemapError, SitemapGenerator, RESOURCE_PATH_PREFIX};
