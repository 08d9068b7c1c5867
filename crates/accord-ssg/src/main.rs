use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::info;

use accord_core::Config;
use accord_seo::{ManifestProvider, Publisher};

#[derive(Parser)]
#[command(name = "accord-ssg")]
#[command(about = "Publish the Accord crawl surface: sitemap.xml and robots.txt")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sitemap.xml and robots.txt into the output directory
    Build {
        /// Override output directory path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override resource manifest path
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())?;
    info!(
        "Loaded configuration: {}",
        cli.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );

    // Read once at startup; the publisher treats it as an explicit input.
    let site_url_override = std::env::var("ACCORD_SITE_URL").ok();

    match cli.command.unwrap_or(Commands::Build {
        output: None,
        manifest: None,
    }) {
        Commands::Build { output, manifest } => {
            let output_dir =
                output.unwrap_or_else(|| PathBuf::from(&config.build.output_dir));
            let manifest_path =
                manifest.unwrap_or_else(|| PathBuf::from(&config.build.manifest));

            info!("   Manifest: {}", manifest_path.display());
            info!("   Output:   {}", output_dir.display());

            let provider = ManifestProvider::new(manifest_path);
            let stats = Publisher::new(config)
                .with_site_url_override(site_url_override)
                .publish(&provider, &output_dir)
                .await?;

            info!(
                "Published {} routes in {}ms",
                stats.routes, stats.duration_ms
            );
        }
    }

    Ok(())
}
