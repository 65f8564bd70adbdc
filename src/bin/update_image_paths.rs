//! Rewrite a newsletter in place so remote image URLs point at local assets.
//!
//! Usage:
//!   update-image-paths [DOCUMENT] [--root DIR] [--mapping FILE]

use anyhow::{Context, Result};
use clap::Parser;
use newsletter_assets::config::ConfigArgs;
use newsletter_assets::prompt::path_or_prompt;
use newsletter_assets::rewrite::{rewrite_file, RewriteOutcome};
use newsletter_assets::AssetConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "update-image-paths",
    about = "Replace remote image URLs in an HTML file with local asset paths"
)]
struct Cli {
    /// Newsletter HTML file to update (prompted for when omitted)
    document: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = AssetConfig::from(cli.config);
    let document = path_or_prompt(
        cli.document,
        "Enter newsletter file name (e.g., newsletter-8.html)",
    )
    .context("Failed to read newsletter file name")?;

    match rewrite_file(&config, &document)? {
        RewriteOutcome::Updated { replacements } => {
            println!("✓ Updated: {}", document.display());
            println!("  {} URL replacements made", replacements);
        }
        RewriteOutcome::NoChanges => {
            println!(
                "No changes needed - file already uses local paths or no matching URLs found"
            );
        }
    }
    Ok(())
}
