//! Map a remote image URL to its place under the asset directory.
//!
//! The result depends only on the URL's path segments, so the same URL lands
//! on the same file across runs. Two URLs sharing a subdir and filename
//! collide and the later download overwrites the earlier one.

use crate::error::{AssetError, Result};

/// Fallback subdirectory when the URL path has no usable parent segment.
pub const FALLBACK_SUBDIR: &str = "images";

/// A derived local location: `<assets_dir>/<subdir>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    pub subdir: String,
    pub filename: String,
    /// Relative path as referenced from rewritten HTML
    pub relative: String,
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_subdir(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Pick the subdirectory from the URL path segments.
///
/// Uses the parent of the file, skipping a redundant `images` segment.
fn pick_subdir<'a>(segments: &[&'a str]) -> &'a str {
    let n = segments.len();
    if n < 2 {
        return FALLBACK_SUBDIR;
    }
    let parent = segments[n - 2];
    if parent != FALLBACK_SUBDIR {
        parent
    } else if n > 2 {
        segments[n - 3]
    } else {
        FALLBACK_SUBDIR
    }
}

/// The path of `url` exactly as written: everything after
/// `scheme://host[:port]`, up to the first `?` or `#`. Nothing is decoded,
/// encoded or normalized.
fn raw_path(url: &str) -> Option<&str> {
    let (_scheme, rest) = url.split_once("://")?;
    let rest = match rest.find(['?', '#']) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(rest.find('/').map_or("", |start| &rest[start..]))
}

/// Derive the local path for `url` under `assets_dir`.
pub fn derive_local_path(url: &str, assets_dir: &str) -> Result<LocalPath> {
    let path = raw_path(url).ok_or_else(|| AssetError::InvalidUrl {
        url: url.to_string(),
        reason: "not an absolute URL".to_string(),
    })?;
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let filename = segments.last().copied().unwrap_or_default();
    if filename.is_empty() {
        return Err(AssetError::InvalidUrl {
            url: url.to_string(),
            reason: "URL path has no filename".to_string(),
        });
    }

    let subdir = sanitize_subdir(pick_subdir(&segments));
    let relative = format!("{}/{}/{}", assets_dir, subdir, filename);
    Ok(LocalPath {
        subdir,
        filename: filename.to_string(),
        relative,
    })
}
