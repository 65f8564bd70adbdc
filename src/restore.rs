//! Refill `#` placeholders in a newsletter from its backup.
//!
//! Image tags are paired by position: the i-th `<img ... src="#">` in the
//! current document takes the i-th `src="URL"` of the backup. Background
//! placeholders are not paired; each mapped background URL in the backup
//! fills the first placeholder of its kind that is still left.

use crate::error::{read_required, AssetError, Result};
use crate::{AssetConfig, UrlMapping, EXTENSION_ALTERNATION};
use regex::{NoExpand, Regex};
use std::path::Path;

const PLACEHOLDER_SRC: &str = "src=\"#\"";
const PLACEHOLDER_BACKGROUND_ATTR: &str = "background=\"#\"";

lazy_static::lazy_static! {
    static ref BACKUP_SRC: Regex = Regex::new(&format!(
        r#"(?i)src="(https?://[^"]+\.(?:{}))""#,
        EXTENSION_ALTERNATION
    ))
    .unwrap();
    static ref BACKUP_BACKGROUND_IMAGE: Regex = Regex::new(&format!(
        r#"(?i)background-image:\s*url\((https?://[^)]+\.(?:{}))\)"#,
        EXTENSION_ALTERNATION
    ))
    .unwrap();
    static ref BACKUP_BACKGROUND_ATTR: Regex = Regex::new(&format!(
        r#"(?i)background="(https?://[^"]+\.(?:{}))""#,
        EXTENSION_ALTERNATION
    ))
    .unwrap();
    static ref PLACEHOLDER_IMG: Regex = Regex::new(r##"<img[^>]+src="#"[^>]*>"##).unwrap();
    static ref PLACEHOLDER_BACKGROUND_IMAGE: Regex =
        Regex::new(r"background-image:\s*url\(#\)").unwrap();
}

/// How to handle a different number of placeholder tags and backup URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingPolicy {
    /// Refuse to pair when the counts differ
    #[default]
    Strict,
    /// Pair as many as both sides have and log a warning
    Lenient,
}

/// One placeholder image that was filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredImage {
    /// Zero-based position among the placeholder tags
    pub index: usize,
    pub local: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restore {
    pub text: String,
    pub images: Vec<RestoredImage>,
    pub backgrounds: usize,
}

impl Restore {
    pub fn is_noop(&self) -> bool {
        self.images.is_empty() && self.backgrounds == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Updated {
        images: Vec<RestoredImage>,
        backgrounds: usize,
    },
    /// Nothing was restored; the file was not written
    NoReplacements,
}

fn captured_urls(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// `src="URL"` image URLs of the backup, in document order.
pub fn backup_image_urls(backup: &str) -> Vec<String> {
    captured_urls(&BACKUP_SRC, backup)
}

/// `<img ... src="#" ...>` tags of the current document, in document order.
pub fn placeholder_tags(current: &str) -> Vec<&str> {
    PLACEHOLDER_IMG
        .find_iter(current)
        .map(|m| m.as_str())
        .collect()
}

fn check_pairing(placeholders: usize, backup_urls: usize, policy: PairingPolicy) -> Result<()> {
    if placeholders == 0 || placeholders == backup_urls {
        return Ok(());
    }
    match policy {
        PairingPolicy::Strict => Err(AssetError::PlaceholderMismatch {
            placeholders,
            backup_urls,
        }),
        PairingPolicy::Lenient => {
            log::warn!(
                "{} placeholder images but {} backup image URLs; pairing the first {}",
                placeholders,
                backup_urls,
                placeholders.min(backup_urls)
            );
            Ok(())
        }
    }
}

/// Fill placeholder image tags, each at its own position in the document.
fn restore_image_tags(
    current: &str,
    backup_urls: &[String],
    mapping: &UrlMapping,
) -> (String, Vec<RestoredImage>) {
    let mut out = String::with_capacity(current.len());
    let mut restored = Vec::new();
    let mut last = 0;

    for (index, m) in PLACEHOLDER_IMG.find_iter(current).enumerate() {
        out.push_str(&current[last..m.start()]);
        let local = backup_urls.get(index).and_then(|url| mapping.get(url));
        match local {
            Some(local) => {
                let filled = format!("src=\"{}\"", local);
                out.push_str(&m.as_str().replace(PLACEHOLDER_SRC, &filled));
                restored.push(RestoredImage {
                    index,
                    local: local.to_string(),
                });
            }
            None => out.push_str(m.as_str()),
        }
        last = m.end();
    }
    out.push_str(&current[last..]);
    (out, restored)
}

/// Fill background placeholders from the backup's background URLs.
fn restore_backgrounds(text: &mut String, backup: &str, mapping: &UrlMapping) -> usize {
    let mut count = 0;

    for url in captured_urls(&BACKUP_BACKGROUND_IMAGE, backup) {
        let Some(local) = mapping.get(&url) else {
            continue;
        };
        if PLACEHOLDER_BACKGROUND_IMAGE.is_match(text) {
            let filled = format!("background-image: url({})", local);
            *text = PLACEHOLDER_BACKGROUND_IMAGE
                .replace(text.as_str(), NoExpand(&filled))
                .into_owned();
            count += 1;
        }
    }

    for url in captured_urls(&BACKUP_BACKGROUND_ATTR, backup) {
        let Some(local) = mapping.get(&url) else {
            continue;
        };
        if text.contains(PLACEHOLDER_BACKGROUND_ATTR) {
            let filled = format!("background=\"{}\"", local);
            *text = text.replacen(PLACEHOLDER_BACKGROUND_ATTR, &filled, 1);
            count += 1;
        }
    }

    count
}

/// Restore placeholders in `current` using URLs from `backup`.
///
/// URLs without a mapping entry are skipped silently and their placeholders
/// stay as they are.
pub fn restore_document(
    backup: &str,
    current: &str,
    mapping: &UrlMapping,
    policy: PairingPolicy,
) -> Result<Restore> {
    let backup_urls = backup_image_urls(backup);
    let placeholders = placeholder_tags(current).len();
    check_pairing(placeholders, backup_urls.len(), policy)?;

    let (mut text, images) = restore_image_tags(current, &backup_urls, mapping);
    let backgrounds = restore_backgrounds(&mut text, backup, mapping);

    Ok(Restore {
        text,
        images,
        backgrounds,
    })
}

/// Restore `current` in place from `backup`. The file is written only when
/// at least one placeholder was filled.
pub fn restore_file(
    config: &AssetConfig,
    backup: &Path,
    current: &Path,
    policy: PairingPolicy,
) -> Result<RestoreOutcome> {
    let mapping = UrlMapping::load(&config.mapping_path())?;
    let backup = config.resolve(backup);
    let current = config.resolve(current);
    let backup_text = read_required(&backup)?;
    let current_text = read_required(&current)?;

    let restore = restore_document(&backup_text, &current_text, &mapping, policy)?;
    if restore.is_noop() {
        log::info!("{}: nothing to restore", current.display());
        return Ok(RestoreOutcome::NoReplacements);
    }

    std::fs::write(&current, &restore.text).map_err(|e| AssetError::io(&current, e))?;
    log::info!(
        "{}: {} images, {} backgrounds restored",
        current.display(),
        restore.images.len(),
        restore.backgrounds
    );
    Ok(RestoreOutcome::Updated {
        images: restore.images,
        backgrounds: restore.backgrounds,
    })
}
