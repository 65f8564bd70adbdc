//! The `url|local` mapping file written by the fetcher.

use crate::error::{read_required, AssetError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Remote URL -> local path, ordered by remote URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMapping {
    entries: BTreeMap<String, String>,
}

impl UrlMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse mapping text. Lines without a `|` are ignored; the first `|`
    /// separates the URL from the local path.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter_map(|line| line.split_once('|'))
            .map(|(orig, local)| (orig.to_string(), local.to_string()))
            .collect();
        Self { entries }
    }

    /// Load a mapping file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_required(path)?;
        let mapping = Self::parse(&content);
        log::debug!("Loaded {} mappings from {}", mapping.len(), path.display());
        Ok(mapping)
    }

    /// Serialize as sorted `orig|local` lines.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (orig, local) in &self.entries {
            out.push_str(orig);
            out.push('|');
            out.push_str(local);
            out.push('\n');
        }
        out
    }

    /// Overwrite `path` with this mapping.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|e| AssetError::io(path, e))
    }

    pub fn insert(&mut self, url: impl Into<String>, local: impl Into<String>) {
        self.entries.insert(url.into(), local.into());
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by URL.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries sorted by URL length descending, so a URL that is a prefix of
    /// another never replaces part of the longer one.
    pub fn longest_first(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_lines_without_separator() {
        let mapping = UrlMapping::parse(
            "https://a.example.com/x.png|assets/a/x.png\n\
             garbage line\n\
             \n\
             https://a.example.com/y.png|assets/a/y|odd.png\n",
        );
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("https://a.example.com/x.png"), Some("assets/a/x.png"));
        assert_eq!(
            mapping.get("https://a.example.com/y.png"),
            Some("assets/a/y|odd.png")
        );
    }

    #[test]
    fn test_save_sorted_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("url_mapping.txt");
        let mapping: UrlMapping = [
            ("https://b.example.com/2.png", "assets/b/2.png"),
            ("https://a.example.com/1.png", "assets/a/1.png"),
        ]
        .into_iter()
        .collect();
        mapping.save(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "https://a.example.com/1.png|assets/a/1.png\n\
             https://b.example.com/2.png|assets/b/2.png\n"
        );
        assert_eq!(UrlMapping::load(&path).unwrap(), mapping);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            UrlMapping::load(&dir.path().join("nope.txt")),
            Err(AssetError::MissingInputFile { .. })
        ));
    }

    #[test]
    fn test_longest_first() {
        let mapping: UrlMapping = [
            ("https://a.example.com/x.png", "1"),
            ("https://a.example.com/x.png.png", "2"),
        ]
        .into_iter()
        .collect();
        let order: Vec<&str> = mapping.longest_first().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            order,
            vec!["https://a.example.com/x.png.png", "https://a.example.com/x.png"]
        );
    }
}
