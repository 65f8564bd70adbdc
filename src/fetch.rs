//! Download remote images into the asset directory and build the mapping.
//!
//! Downloads run one at a time. A URL whose local file already exists is not
//! fetched again but still goes into the mapping, so re-running the fetcher
//! is cheap and yields the same mapping. Individual failures are collected and
//! reported at the end; they never stop the batch.

use crate::error::{AssetError, Result};
use crate::extract::read_url_list;
use crate::local_path::derive_local_path;
use crate::{AssetConfig, UrlMapping};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source of image bytes.
pub trait ImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) source.
///
/// Certificate validation is disabled: email CDN hosts sometimes present
/// certificates that would otherwise stall this offline tooling.
pub struct HttpImageSource {
    client: reqwest::blocking::Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|source| AssetError::HttpClient { source })?;
        Ok(Self { client })
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let http_err = |source| AssetError::Http {
            url: url.to_string(),
            source,
        };
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(http_err)?;
        let bytes = resp.bytes().map_err(http_err)?;
        Ok(bytes.to_vec())
    }
}

/// A URL that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub message: String,
}

/// What happened to one URL, reported as the batch progresses.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    Downloaded { url: &'a str, filename: &'a str },
    Skipped { url: &'a str, filename: &'a str },
    Failed(&'a FetchFailure),
}

/// Outcome of a fetch batch.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Successful entries only (downloaded or already on disk)
    pub mapping: UrlMapping,
    pub downloaded: usize,
    pub skipped: usize,
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.mapping.len()
    }
}

fn write_asset(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| AssetError::io(path, e))
}

/// Where a URL goes: relative path for the mapping, on-disk path, filename.
fn locate(config: &AssetConfig, url: &str) -> Result<(String, PathBuf, String)> {
    let local = derive_local_path(url, &config.assets_dir)?;
    let on_disk = config.asset_file(&local.relative);
    Ok((local.relative, on_disk, local.filename))
}

/// Download every URL (in sorted order) and overwrite the mapping file with
/// the successful entries.
///
/// Calls `on_progress` once per URL.
pub fn fetch_images(
    config: &AssetConfig,
    urls: &[String],
    source: &dyn ImageSource,
    mut on_progress: impl FnMut(&FetchEvent),
) -> Result<FetchReport> {
    let assets_root = config.root.join(&config.assets_dir);
    std::fs::create_dir_all(&assets_root).map_err(|e| AssetError::io(&assets_root, e))?;

    let mut sorted: Vec<&String> = urls.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut report = FetchReport::default();

    for url in sorted {
        let attempt = locate(config, url).and_then(|(relative, on_disk, filename)| {
            if on_disk.exists() {
                log::debug!("{} already at {}", url, on_disk.display());
                on_progress(&FetchEvent::Skipped {
                    url: url.as_str(),
                    filename: &filename,
                });
                report.skipped += 1;
            } else {
                let bytes = source.fetch(url)?;
                write_asset(&on_disk, &bytes)?;
                log::debug!("{} -> {} ({} bytes)", url, on_disk.display(), bytes.len());
                on_progress(&FetchEvent::Downloaded {
                    url: url.as_str(),
                    filename: &filename,
                });
                report.downloaded += 1;
            }
            Ok(relative)
        });

        match attempt {
            Ok(relative) => report.mapping.insert(url.as_str(), relative),
            Err(e) => {
                log::warn!("Error downloading {}: {}", url, e);
                let failure = FetchFailure {
                    url: url.clone(),
                    message: e.to_string(),
                };
                on_progress(&FetchEvent::Failed(&failure));
                report.failures.push(failure);
            }
        }
    }

    report.mapping.save(&config.mapping_path())?;
    log::info!(
        "{} downloaded, {} already present, {} failed",
        report.downloaded,
        report.skipped,
        report.failures.len()
    );
    Ok(report)
}

/// Read the configured URL list and run [`fetch_images`] over it.
pub fn download_from_list(
    config: &AssetConfig,
    source: &dyn ImageSource,
    on_progress: impl FnMut(&FetchEvent),
) -> Result<FetchReport> {
    let list_path = config.url_list_path();
    let urls = read_url_list(&list_path)?;
    if urls.is_empty() {
        return Err(AssetError::EmptyInput {
            path: list_path,
            what: "URLs",
        });
    }
    fetch_images(config, &urls, source, on_progress)
}
