//! Replace remote image URLs in a document with their local paths.
//!
//! All substitution is literal string replacement. The attribute and CSS
//! forms are replaced first, then any remaining bare occurrence of the URL.

use crate::error::{read_required, AssetError, Result};
use crate::{AssetConfig, UrlMapping};
use std::path::Path;

/// Surface forms replaced before the catch-all pass, as (before, after) the URL.
const CONTEXTS: [(&str, &str); 7] = [
    ("src=\"", "\""),
    ("src='", "'"),
    ("url(", ")"),
    ("url('", "')"),
    ("url(\"", "\")"),
    ("background=\"", "\""),
    ("background='", "'"),
];

/// Rewritten text plus the number of substitutions made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub replacements: usize,
}

/// Result of rewriting a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    Updated { replacements: usize },
    /// Nothing matched; the file was left untouched
    NoChanges,
}

/// Replace every occurrence of `from` in `text`, returning how many there were.
fn replace_counted(text: &mut String, from: &str, to: &str) -> usize {
    let count = text.matches(from).count();
    if count > 0 {
        *text = text.replace(from, to);
    }
    count
}

/// Rewrite every mapped URL in `text` to its local path.
pub fn rewrite_document(text: &str, mapping: &UrlMapping) -> Rewrite {
    let mut out = text.to_string();
    let mut replacements = 0usize;

    for (orig, local) in mapping.longest_first() {
        if !out.contains(orig) {
            continue;
        }
        for (open, close) in CONTEXTS {
            let from = format!("{}{}{}", open, orig, close);
            let to = format!("{}{}{}", open, local, close);
            replacements += replace_counted(&mut out, &from, &to);
        }
        replacements += replace_counted(&mut out, orig, local);
    }

    Rewrite {
        text: out,
        replacements,
    }
}

/// Rewrite `document` in place using the configured mapping file.
pub fn rewrite_file(config: &AssetConfig, document: &Path) -> Result<RewriteOutcome> {
    let mapping_path = config.mapping_path();
    let mapping = UrlMapping::load(&mapping_path)?;
    if mapping.is_empty() {
        return Err(AssetError::EmptyInput {
            path: mapping_path,
            what: "URL mappings",
        });
    }

    let document = config.resolve(document);
    let original = read_required(&document)?;
    let rewrite = rewrite_document(&original, &mapping);

    if rewrite.text == original {
        log::info!("{}: no mapped URLs found", document.display());
        return Ok(RewriteOutcome::NoChanges);
    }
    std::fs::write(&document, &rewrite.text).map_err(|e| AssetError::io(&document, e))?;
    log::info!(
        "{}: {} URL replacements",
        document.display(),
        rewrite.replacements
    );
    Ok(RewriteOutcome::Updated {
        replacements: rewrite.replacements,
    })
}
