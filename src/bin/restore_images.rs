//! Restore `src="#"` image placeholders (and background placeholders) in a
//! newsletter from the image URLs of its backup, using local asset paths.
//!
//! Placeholder images are paired with backup images by position. By default
//! the tool refuses to run when their counts differ; `--lenient` pairs as
//! many as possible instead.
//!
//! Usage:
//!   restore-images [BACKUP] [CURRENT] [--lenient] [--root DIR]

use anyhow::{Context, Result};
use clap::Parser;
use newsletter_assets::config::ConfigArgs;
use newsletter_assets::prompt::path_or_prompt;
use newsletter_assets::restore::{restore_file, PairingPolicy, RestoreOutcome};
use newsletter_assets::AssetConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "restore-images",
    about = "Restore placeholder images in a newsletter from its backup"
)]
struct Cli {
    /// Backup HTML file with the original image URLs
    backup: Option<PathBuf>,

    /// Current HTML file with `#` placeholders (updated in place)
    current: Option<PathBuf>,

    /// Pair placeholders with backup images even when their counts differ
    #[arg(long)]
    lenient: bool,

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
    let current = path_or_prompt(
        cli.current,
        "Enter current file name (e.g., newsletter-8.html)",
    )
    .context("Failed to read current file name")?;
    let policy = if cli.lenient {
        PairingPolicy::Lenient
    } else {
        PairingPolicy::Strict
    };
    let config = AssetConfig::from(cli.config);

    match restore_file(&config, &backup, &current, policy)? {
        RestoreOutcome::Updated {
            images,
            backgrounds,
        } => {
            for image in &images {
                let name = Path::new(&image.local)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| image.local.clone());
                println!("  Restored image {}: {}", image.index + 1, name);
            }
            println!(
                "\n✓ Updated {}: {} images, {} backgrounds",
                current.display(),
                images.len(),
                backgrounds
            );
        }
        RestoreOutcome::NoReplacements => {
            println!(
                "\nNo replacements made. Check that the backup file contains matching image URLs."
            );
        }
    }
    Ok(())
}
