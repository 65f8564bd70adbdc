//! Newsletter Asset Toolkit
//!
//! Tools for moving an HTML email newsletter's remote images onto local disk.
//!
//! This library provides:
//! - `extract`: Find absolute image URLs in a backup document
//! - `local_path`: Derive the `assets/<subdir>/<filename>` path for a URL
//! - `mapping`: Read and write the `url|local` mapping file
//! - `fetch`: Download images and build the mapping
//! - `rewrite`: Replace remote URLs in a document with local paths
//! - `restore`: Refill `#` placeholders from a backup document
//!
//! Binaries:
//! - `extract-urls`: Backup HTML -> `image_urls_clean.txt`
//! - `download-images`: `image_urls_clean.txt` -> `assets/` + `url_mapping.txt`
//! - `update-image-paths`: Rewrite a newsletter in place
//! - `restore-images`: Restore placeholder images in a newsletter

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod local_path;
pub mod mapping;
pub mod prompt;
pub mod restore;
pub mod rewrite;

pub use config::AssetConfig;
pub use error::{AssetError, Result};
pub use mapping::UrlMapping;

/// Image file extensions recognized in remote URLs (matched case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Regex alternation of [`IMAGE_EXTENSIONS`], for embedding in patterns.
pub(crate) const EXTENSION_ALTERNATION: &str = "png|jpg|jpeg|gif|webp|svg";

/// True if `url` starts with an HTTP(S) scheme and ends with a recognized
/// image extension.
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://"))
        && IMAGE_EXTENSIONS
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)))
}
