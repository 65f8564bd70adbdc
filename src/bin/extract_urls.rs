//! Extract remote image URLs from a backup newsletter and save them to the
//! URL list (`image_urls_clean.txt` by default).
//!
//! Usage:
//!   extract-urls [BACKUP] [--root DIR]

use anyhow::{Context, Result};
use clap::Parser;
use newsletter_assets::config::ConfigArgs;
use newsletter_assets::extract::extract_to_file;
use newsletter_assets::prompt::path_or_prompt;
use newsletter_assets::AssetConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "extract-urls",
    about = "Extract image URLs from a backup HTML file"
)]
struct Cli {
    /// Backup HTML file (prompted for when omitted)
    backup: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let backup = path_or_prompt(
        cli.backup,
        "Enter backup file name (e.g., newsletter-8-backup.html)",
    )
    .context("Failed to read backup file name")?;
    let config = AssetConfig::from(cli.config);

    let urls = extract_to_file(&config, &backup)?;
    println!("✓ Found {} unique image URLs", urls.len());
    println!("  Saved to {}", config.url_list_path().display());
    Ok(())
}
