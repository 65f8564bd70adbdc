//! Find remote image URLs in a backup document.
//!
//! Any host is accepted: export tools rewrite image links through whatever
//! CDN the email provider uses, so filtering by domain would drop images.

use crate::error::{read_required, AssetError, Result};
use crate::{is_image_url, AssetConfig, EXTENSION_ALTERNATION};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

lazy_static::lazy_static! {
    static ref IMAGE_URL: Regex = Regex::new(&format!(
        r#"(?i)https?://[^\s"'>)]+\.(?:{})"#,
        EXTENSION_ALTERNATION
    ))
    .unwrap();
}

/// Cut a raw match at the first character that cannot belong to the URL.
fn trim_url(raw: &str) -> &str {
    raw.split([')', '"', '\'', '>', ' '])
        .next()
        .unwrap_or_default()
}

/// All distinct image URLs in `text`, sorted lexicographically.
pub fn extract_image_urls(text: &str) -> Vec<String> {
    let urls: BTreeSet<String> = IMAGE_URL
        .find_iter(text)
        .map(|m| trim_url(m.as_str()))
        .filter(|url| is_image_url(url))
        .map(str::to_string)
        .collect();
    urls.into_iter().collect()
}

/// Write one URL per line, each terminated by a newline.
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<()> {
    let mut out = String::new();
    for url in urls {
        out.push_str(url);
        out.push('\n');
    }
    std::fs::write(path, out).map_err(|e| AssetError::io(path, e))
}

/// Read a URL list, skipping blank lines.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = read_required(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Extract image URLs from `backup` and save them to the configured URL list.
///
/// A missing backup fails before anything is written, so a stale or empty
/// list is never mistaken for "no images".
pub fn extract_to_file(config: &AssetConfig, backup: &Path) -> Result<Vec<String>> {
    let backup = config.resolve(backup);
    let content = read_required(&backup)?;
    let urls = extract_image_urls(&content);
    log::info!("{}: {} unique image URLs", backup.display(), urls.len());
    write_url_list(&config.url_list_path(), &urls)?;
    Ok(urls)
}
