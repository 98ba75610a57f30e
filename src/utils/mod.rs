//! Utility functions and helpers

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serializer;
use sha2::{Digest, Sha256};

/// Hash length used when a template placeholder gives none
const DEFAULT_HASH_LENGTH: usize = 20;

static HASH_PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?:hash|chunkhash|contenthash)(?::(\d+))?\]").unwrap());

/// Generate a hex hash of the given content
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Render an output filename template
///
/// Supports `[name]` and `[hash]`, `[chunkhash]` or `[contenthash]` with an
/// optional `:N` length suffix.
pub fn render_filename(template: &str, name: &str, content: &[u8]) -> String {
    let hash = hash_content(content);

    let rendered = HASH_PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| {
        let len = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(DEFAULT_HASH_LENGTH)
            .min(hash.len());
        hash[..len].to_string()
    });

    rendered.replace("[name]", name)
}

/// Convert a file path to a forward-slash module ID
pub fn path_to_module_id(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "/")
}

/// Get relative path from base to target
pub fn relative_path(from: &Path, to: &Path) -> Option<String> {
    pathdiff::diff_paths(to, from)
        .map(|p| path_to_module_id(&p))
}

/// Serialize a regex as its source pattern
pub fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}
