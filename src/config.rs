//! Where the tools read and write their files.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_URL_LIST: &str = "image_urls_clean.txt";
pub const DEFAULT_MAPPING_FILE: &str = "url_mapping.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by every tool in the pipeline.
///
/// Relative paths are resolved against `root`.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Working directory for the newsletter (contains `assets/`)
    pub root: PathBuf,
    /// Asset directory name, also the prefix of every local path
    pub assets_dir: String,
    /// URL list written by the extractor and read by the fetcher
    pub url_list: PathBuf,
    /// `url|local` mapping file
    pub mapping_file: PathBuf,
    /// Per-request download timeout
    pub timeout: Duration,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            url_list: PathBuf::from(DEFAULT_URL_LIST),
            mapping_file: PathBuf::from(DEFAULT_MAPPING_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AssetConfig {
    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve a path against the root. Absolute paths are returned as-is.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn url_list_path(&self) -> PathBuf {
        self.resolve(&self.url_list)
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.resolve(&self.mapping_file)
    }

    /// On-disk location of a local path such as `assets/promo/banner.jpg`.
    pub fn asset_file(&self, local_path: &str) -> PathBuf {
        self.root.join(local_path)
    }
}

/// Command-line options shared by every binary.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Newsletter working directory (holds assets/ and the list/mapping files)
    #[arg(long, env = "NEWSLETTER_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Asset directory name, used as the prefix of local paths
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets_dir: String,

    /// URL list file
    #[arg(long, default_value = DEFAULT_URL_LIST)]
    pub url_list: PathBuf,

    /// URL mapping file
    #[arg(long, default_value = DEFAULT_MAPPING_FILE)]
    pub mapping: PathBuf,

    /// Per-image download timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl From<ConfigArgs> for AssetConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            root: args.root,
            assets_dir: args.assets_dir,
            url_list: args.url_list,
            mapping_file: args.mapping,
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}
