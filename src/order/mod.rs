//! Injection order for emitted chunks
//!
//! Chunks are injected into the HTML document by the leading segment of their
//! name: polyfills first, then libraries and components, then the app.

use std::cmp::Ordering;

/// Chunk name prefixes in load order
pub const LOAD_ORDER: [&str; 6] = ["polyfill", "lib", "antv", "component", "app", "main"];

/// Leading `.`-delimited segment of a chunk name
pub fn prefix(chunk_name: &str) -> &str {
    chunk_name.split('.').next().unwrap_or(chunk_name)
}

/// Position of a chunk in [`LOAD_ORDER`], or -1 when its prefix is unknown
pub fn priority(chunk_name: &str) -> i32 {
    let prefix = prefix(chunk_name);
    LOAD_ORDER
        .iter()
        .position(|candidate| *candidate == prefix)
        .map_or(-1, |index| index as i32)
}

/// Comparator over chunk names: negative when `a` loads before `b`
pub fn compare(a: &str, b: &str) -> i32 {
    priority(a) - priority(b)
}

/// [`compare`] as an [`Ordering`]
pub fn ordering(a: &str, b: &str) -> Ordering {
    compare(a, b).cmp(&0)
}

/// Sort chunk names into injection order
///
/// The sort is stable, so chunks sharing a priority keep their input order.
pub fn sort_chunks<S: AsRef<str>>(chunks: &mut [S]) {
    chunks.sort_by(|a, b| ordering(a.as_ref(), b.as_ref()));
}
