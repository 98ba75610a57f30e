//! Chunk assignment for third-party dependencies
//!
//! Modules living under `node_modules` are split out of the application
//! bundle in two ways:
//! - statically, into named vendor chunks chosen by [`classify`]
//! - dynamically, one chunk per nested import context for async code

mod group;
mod rules;

use once_cell::sync::Lazy;
use regex::Regex;

pub use group::{CacheGroup, ChunkKind, ChunkNaming, SplitChunks};
pub use rules::{classify, labels, ChunkRule, RuleSubject, DEFAULT_CHUNK, VENDOR_RULES};

/// Boundary between application code and dependency code
pub static NODE_MODULES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\/]node_modules").unwrap());

static PACKAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\/]node_modules[\\/](.*?)([\\/]|$)").unwrap());

static NESTED_CONTEXT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\/]node_modules[\\/](.*?)[\\/](.*?)([\\/]|$)").unwrap());

/// Extract the package name from a module context path
///
/// This is the first path segment after the first `node_modules` marker, so
/// scoped packages yield their scope (`@ant-design`).
pub fn package_name_from_context(context: &str) -> Option<&str> {
    PACKAGE_REGEX
        .captures(context)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

/// Name of the static vendor chunk a module context belongs to
pub fn vendor_chunk_name(context: &str) -> Option<&'static str> {
    package_name_from_context(context).map(|name| classify(name, context))
}

/// Name of the async chunk a module context belongs to
///
/// Uses the first-level subdirectory of the imported package:
/// `.../node_modules/foo/bar/index.js` becomes `app.bar.dynamic`. Contexts
/// with no such subdirectory get no dynamic chunk.
pub fn dynamic_chunk_name(context: &str) -> Option<String> {
    let caps = NESTED_CONTEXT_REGEX.captures(context)?;
    let segment = caps.get(2)?.as_str();

    if segment.is_empty() {
        return None;
    }

    Some(format!("app.{}.dynamic", segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_package_name_from_context() {
        assert_eq!(
            package_name_from_context("/app/node_modules/react-dom/cjs"),
            Some("react-dom")
        );
        assert_eq!(
            package_name_from_context("/app/node_modules/lodash"),
            Some("lodash")
        );
        assert_eq!(
            package_name_from_context(r"C:\app\node_modules\moment\locale"),
            Some("moment")
        );
        assert_eq!(
            package_name_from_context("/app/node_modules/@ant-design/icons/lib"),
            Some("@ant-design")
        );
        assert_eq!(package_name_from_context("/app/src/components"), None);
        assert_eq!(package_name_from_context("node_modules/react"), None);
    }

    #[test]
    fn test_first_marker_wins() {
        assert_eq!(
            package_name_from_context("/app/node_modules/antd/node_modules/rc-util/lib"),
            Some("antd")
        );
    }

    #[test]
    fn test_vendor_chunk_name() {
        assert_eq!(
            vendor_chunk_name("/app/node_modules/react-dom/cjs"),
            Some("react")
        );
        assert_eq!(
            vendor_chunk_name("/app/node_modules/foo/intl-messages/index.js"),
            Some("intl")
        );
        assert_eq!(vendor_chunk_name("/app/node_modules/left-pad"), Some("other"));
        assert_eq!(vendor_chunk_name("/app/src/index.js"), None);
        assert_eq!(vendor_chunk_name("/app/node_modules//x"), None);
    }

    #[test]
    fn test_dynamic_chunk_name() {
        assert_eq!(
            dynamic_chunk_name("/project/node_modules/foo/bar/index.js"),
            Some("app.bar.dynamic".to_string())
        );
        assert_eq!(
            dynamic_chunk_name("/project/node_modules/foo/bar"),
            Some("app.bar.dynamic".to_string())
        );
        assert_eq!(
            dynamic_chunk_name(r"D:\project\node_modules\echarts\lib\chart"),
            Some("app.lib.dynamic".to_string())
        );
        assert_eq!(
            dynamic_chunk_name("/project/node_modules/@antv/g6/es"),
            Some("app.g6.dynamic".to_string())
        );
    }

    #[test]
    fn test_dynamic_chunk_name_without_subdirectory() {
        assert_eq!(dynamic_chunk_name("/project/node_modules/foo"), None);
        assert_eq!(dynamic_chunk_name("/project/node_modules/foo/"), None);
        assert_eq!(dynamic_chunk_name("/project/src/pages/home"), None);
    }
}
