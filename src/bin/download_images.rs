//! Download every image in the URL list into `assets/<subdir>/<filename>`
//! and write the `url|local` mapping file.
//!
//! Images already on disk are not downloaded again. Failed downloads are
//! listed at the end and left out of the mapping.
//!
//! Usage:
//!   download-images [--root DIR] [--timeout-secs N]

use anyhow::{Context, Result};
use clap::Parser;
use newsletter_assets::config::ConfigArgs;
use newsletter_assets::fetch::{download_from_list, FetchEvent, HttpImageSource};
use newsletter_assets::AssetConfig;

#[derive(Parser)]
#[command(
    name = "download-images",
    about = "Download images listed in the URL list into the assets folder"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = AssetConfig::from(cli.config);
    let source =
        HttpImageSource::new(config.timeout).context("Failed to build HTTP client")?;

    println!(
        "Downloading images from {}...",
        config.url_list_path().display()
    );
    let report = download_from_list(&config, &source, |event| match event {
        FetchEvent::Downloaded { filename, .. } => println!("Downloading: {}", filename),
        FetchEvent::Skipped { filename, .. } => println!("Skipping (exists): {}", filename),
        FetchEvent::Failed(failure) => {
            println!("Error downloading {}: {}", failure.url, failure.message)
        }
    })?;

    println!(
        "\nDownloaded {} images successfully! ({} new, {} already present)",
        report.succeeded(),
        report.downloaded,
        report.skipped
    );
    if !report.failures.is_empty() {
        println!("\n{} errors occurred:", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.url, failure.message);
        }
    }
    println!("Mapping saved to {}", config.mapping_path().display());
    Ok(())
}
