//! Error types for the newsletter asset tools.
//!
//! Hard failures (a required input file is missing, the pairing precondition
//! of the restorer does not hold) are returned as [`AssetError`]. Per-URL
//! download failures are not errors at this level: they are collected into
//! [`crate::fetch::FetchFailure`] records so the batch keeps going.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssetError>;

#[derive(Debug, Error)]
pub enum AssetError {
    /// A required input file does not exist.
    #[error("{} not found", .path.display())]
    MissingInputFile { path: PathBuf },

    /// An input file exists but holds nothing usable.
    #[error("No {what} found in {}", .path.display())]
    EmptyInput { path: PathBuf, what: &'static str },

    /// A URL could not be turned into a local path.
    #[error("Invalid image URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Request failed or the server answered with a non-success status.
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be set up.
    #[error("Failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// Placeholder tags and backup image URLs cannot be paired by position.
    #[error(
        "Found {placeholders} placeholder images but {backup_urls} image URLs in the backup; \
         refusing to pair by position (use --lenient to pair anyway)"
    )]
    PlaceholderMismatch {
        placeholders: usize,
        backup_urls: usize,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Fail with [`AssetError::MissingInputFile`] unless `path` exists.
pub(crate) fn require_file(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AssetError::MissingInputFile {
            path: path.to_path_buf(),
        })
    }
}

/// Read a UTF-8 file that must exist.
pub(crate) fn read_required(path: &std::path::Path) -> Result<String> {
    require_file(path)?;
    std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = read_required(std::path::Path::new("/nonexistent/backup.html")).unwrap_err();
        assert!(matches!(err, AssetError::MissingInputFile { .. }));
        assert_eq!(err.to_string(), "/nonexistent/backup.html not found");
    }
}
