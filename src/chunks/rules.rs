//! Vendor chunk classification rules
//!
//! Third-party packages are grouped into a small set of long-lived vendor
//! chunks. Rules are tried in declaration order and the first match wins, so
//! a package satisfying several patterns always lands in the earliest one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Chunk every package falls back to
pub const DEFAULT_CHUNK: &str = "other";

/// Which input a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSubject {
    /// The package name (first path segment below `node_modules`)
    PackageName,
    /// The full context path of the importing module
    Context,
}

/// A single `(predicate, chunk)` pair
#[derive(Debug)]
pub struct ChunkRule {
    /// Chunk assigned on match
    pub label: &'static str,

    /// Input the pattern is tested against
    pub subject: RuleSubject,

    /// `None` matches unconditionally
    pattern: Option<Regex>,
}

impl ChunkRule {
    fn package(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            subject: RuleSubject::PackageName,
            pattern: Some(Regex::new(pattern).unwrap()),
        }
    }

    fn context(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            subject: RuleSubject::Context,
            pattern: Some(Regex::new(pattern).unwrap()),
        }
    }

    fn fallback(label: &'static str) -> Self {
        Self {
            label,
            subject: RuleSubject::PackageName,
            pattern: None,
        }
    }

    /// Source of the rule's pattern, if it has one
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Apply the rule, returning its label on match
    pub fn apply(&self, package_name: &str, context: &str) -> Option<&'static str> {
        let Some(pattern) = &self.pattern else {
            return Some(self.label);
        };

        let input = match self.subject {
            RuleSubject::PackageName => package_name,
            RuleSubject::Context => context,
        };

        pattern.is_match(input).then_some(self.label)
    }
}

/// Ordered vendor rules, terminated by the catch-all
pub static VENDOR_RULES: Lazy<Vec<ChunkRule>> = Lazy::new(|| {
    vec![
        ChunkRule::package("react", r"^dva|redux|react"),
        ChunkRule::package("rc", r"^rc-"),
        ChunkRule::package(
            "polyfill",
            r"polyfill|babel|core-js|object-assign|isarray|symbol-observable|is-plain-object|isobject|async-validator",
        ),
        ChunkRule::package("moment", r"moment"),
        ChunkRule::package("lodash", r"lodash"),
        ChunkRule::package("bizcharts", r"bizcharts"),
        ChunkRule::package("antv", r"^@antv"),
        ChunkRule::package("antd", r"antd|@ant-design|sa-antd"),
        ChunkRule::context("intl", r"intl-messages"),
        ChunkRule::package("sc", r"^@sc"),
        ChunkRule::fallback(DEFAULT_CHUNK),
    ]
});

/// Every label a package can be classified into, in rule order
pub fn labels() -> impl Iterator<Item = &'static str> {
    VENDOR_RULES.iter().map(|rule| rule.label)
}

/// Classify a package into its vendor chunk
///
/// `context` is only consulted by rules that inspect the importing module's
/// location (message bundles). Total: unmatched input yields [`DEFAULT_CHUNK`].
pub fn classify(package_name: &str, context: &str) -> &'static str {
    VENDOR_RULES
        .iter()
        .find_map(|rule| rule.apply(package_name, context))
        .unwrap_or(DEFAULT_CHUNK)
}
