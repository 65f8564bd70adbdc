//! End-to-end test of the asset pipeline on a small newsletter.
//!
//! Runs extract -> fetch -> rewrite and extract -> fetch -> restore against a
//! temporary working directory, with an in-memory image source standing in
//! for the network.

use newsletter_assets::extract::{extract_to_file, read_url_list};
use newsletter_assets::fetch::{download_from_list, ImageSource};
use newsletter_assets::restore::{restore_file, PairingPolicy, RestoreOutcome};
use newsletter_assets::rewrite::{rewrite_file, RewriteOutcome};
use newsletter_assets::{AssetConfig, AssetError, UrlMapping};
use std::path::Path;

const BACKUP: &str = r#"<html><body>
<table>
  <tr><td><img src="https://cdn.example.com/images/promo/banner.jpg" alt="Banner"></td></tr>
  <tr><td style="background-image: url(https://img.mailer.net/abc/images/bg.png)">
    <img src="https://cdn.example.com/news/photo1.JPG" width="300">
  </td></tr>
  <tr><td background="https://img.mailer.net/abc/tile.gif">
    <img src="https://broken.example.com/x/missing.png">
  </td></tr>
</table>
<a href="https://example.com/read-more.html">Read more</a>
</body></html>
"#;

const CURRENT: &str = r##"<html><body>
<table>
  <tr><td><img src="#" alt="Banner"></td></tr>
  <tr><td style="background-image: url(#)">
    <img src="#" width="300">
  </td></tr>
  <tr><td background="#">
    <img src="#">
  </td></tr>
</table>
<a href="https://example.com/read-more.html">Read more</a>
</body></html>
"##;

/// Serves a fixed body for every URL except those on `broken.example.com`.
struct FakeCdn;

impl ImageSource for FakeCdn {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        if url.contains("broken.example.com") {
            return Err(AssetError::InvalidUrl {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(format!("image bytes for {}", url).into_bytes())
    }
}

fn setup() -> (tempfile::TempDir, AssetConfig) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("newsletter-8-backup.html"), BACKUP).unwrap();
    let config = AssetConfig::with_root(dir.path());
    (dir, config)
}

#[test]
fn test_extract_then_download() {
    let (dir, config) = setup();

    let urls = extract_to_file(&config, Path::new("newsletter-8-backup.html")).unwrap();
    assert_eq!(
        urls,
        vec![
            "https://broken.example.com/x/missing.png",
            "https://cdn.example.com/images/promo/banner.jpg",
            "https://cdn.example.com/news/photo1.JPG",
            "https://img.mailer.net/abc/images/bg.png",
            "https://img.mailer.net/abc/tile.gif",
        ]
    );
    assert_eq!(read_url_list(&config.url_list_path()).unwrap(), urls);

    let report = download_from_list(&config, &FakeCdn, |_| {}).unwrap();
    assert_eq!(report.downloaded, 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].url,
        "https://broken.example.com/x/missing.png"
    );

    let mapping = UrlMapping::load(&config.mapping_path()).unwrap();
    assert_eq!(mapping.len(), 4);
    assert_eq!(
        mapping.get("https://img.mailer.net/abc/images/bg.png"),
        Some("assets/abc/bg.png")
    );
    assert!(dir.path().join("assets/news/photo1.JPG").exists());
    assert!(!dir.path().join("assets/x/missing.png").exists());

    // Re-running is idempotent
    let again = download_from_list(&config, &FakeCdn, |_| {}).unwrap();
    assert_eq!(again.downloaded, 0);
    assert_eq!(again.skipped, 4);
    assert_eq!(again.mapping, mapping);
}

#[test]
fn test_rewrite_backup_to_local_paths() {
    let (dir, config) = setup();
    extract_to_file(&config, Path::new("newsletter-8-backup.html")).unwrap();
    download_from_list(&config, &FakeCdn, |_| {}).unwrap();

    let outcome = rewrite_file(&config, Path::new("newsletter-8-backup.html")).unwrap();
    assert_eq!(outcome, RewriteOutcome::Updated { replacements: 4 });

    let rewritten = std::fs::read_to_string(dir.path().join("newsletter-8-backup.html")).unwrap();
    assert!(rewritten.contains(r#"<img src="assets/promo/banner.jpg" alt="Banner">"#));
    assert!(rewritten.contains("background-image: url(assets/abc/bg.png)"));
    assert!(rewritten.contains(r#"background="assets/abc/tile.gif""#));
    // Failed download keeps its remote URL
    assert!(rewritten.contains("https://broken.example.com/x/missing.png"));
    assert!(rewritten.contains("https://example.com/read-more.html"));

    let outcome = rewrite_file(&config, Path::new("newsletter-8-backup.html")).unwrap();
    assert_eq!(outcome, RewriteOutcome::NoChanges);
}

#[test]
fn test_restore_placeholders_from_backup() {
    let (dir, config) = setup();
    std::fs::write(dir.path().join("newsletter-8.html"), CURRENT).unwrap();
    extract_to_file(&config, Path::new("newsletter-8-backup.html")).unwrap();
    download_from_list(&config, &FakeCdn, |_| {}).unwrap();

    let outcome = restore_file(
        &config,
        Path::new("newsletter-8-backup.html"),
        Path::new("newsletter-8.html"),
        PairingPolicy::Strict,
    )
    .unwrap();
    let RestoreOutcome::Updated {
        images,
        backgrounds,
    } = outcome
    else {
        panic!("expected an update");
    };
    let indices: Vec<usize> = images.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(backgrounds, 2);

    let restored = std::fs::read_to_string(dir.path().join("newsletter-8.html")).unwrap();
    assert!(restored.contains(r#"<img src="assets/promo/banner.jpg" alt="Banner">"#));
    assert!(restored.contains(r#"<img src="assets/news/photo1.JPG" width="300">"#));
    assert!(restored.contains("background-image: url(assets/abc/bg.png)"));
    assert!(restored.contains(r#"background="assets/abc/tile.gif""#));
    // The image whose download failed stays a placeholder
    assert!(restored.contains(r##"<img src="#">"##));
}

#[test]
fn test_missing_backup_is_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = AssetConfig::with_root(dir.path());
    let err = extract_to_file(&config, Path::new("newsletter-9-backup.html")).unwrap_err();
    assert!(matches!(err, AssetError::MissingInputFile { .. }));
    assert!(!config.url_list_path().exists());
}
