//! Split-chunks cache groups

use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::{dynamic_chunk_name, vendor_chunk_name, NODE_MODULES_REGEX};
use crate::utils::serialize_regex;

/// Which chunks a cache group may select modules from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Both initial and async chunks
    All,
    /// Chunks loaded with the page
    Initial,
    /// Chunks loaded on demand via dynamic import
    Async,
}

impl ChunkKind {
    /// Whether a group restricted to `self` accepts a module loaded as `kind`
    pub fn accepts(self, kind: ChunkKind) -> bool {
        self == ChunkKind::All || kind == ChunkKind::All || self == kind
    }
}

/// How a cache group names the chunk it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "value", rename_all = "camelCase")]
pub enum ChunkNaming {
    /// Always the same chunk
    Fixed(String),
    /// Named by the vendor classification rules
    Vendor,
    /// One chunk per nested dependency context
    PerContext,
}

/// A named group of modules split into its own chunk(s)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    /// Key the group is registered under
    #[serde(skip)]
    pub key: String,

    /// Module contexts the group applies to
    #[serde(serialize_with = "serialize_regex")]
    pub test: Regex,

    /// Chunk naming strategy
    pub name: ChunkNaming,

    /// Restricts the group to one chunk kind; inherits otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkKind>,

    /// Ignore size and request limits for this group
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enforce: bool,
}

impl CacheGroup {
    /// Vendor modules grouped by classification
    pub fn vendor() -> Self {
        Self {
            key: "bundle".to_string(),
            test: Regex::clone(&NODE_MODULES_REGEX),
            name: ChunkNaming::Vendor,
            chunks: None,
            enforce: false,
        }
    }

    /// Vendor modules needed at startup
    pub fn initial() -> Self {
        Self {
            key: "initial".to_string(),
            test: Regex::clone(&NODE_MODULES_REGEX),
            name: ChunkNaming::Fixed("app.initial".to_string()),
            chunks: Some(ChunkKind::Initial),
            enforce: false,
        }
    }

    /// Vendor modules only reached through dynamic imports
    pub fn dynamic() -> Self {
        Self {
            key: "dynamic".to_string(),
            test: Regex::clone(&NODE_MODULES_REGEX),
            name: ChunkNaming::PerContext,
            chunks: Some(ChunkKind::Async),
            enforce: true,
        }
    }

    /// Chunk this group assigns a module context to, if the group applies
    pub fn chunk_name(&self, context: &str) -> Option<String> {
        if !self.test.is_match(context) {
            return None;
        }

        match &self.name {
            ChunkNaming::Fixed(name) => Some(name.clone()),
            ChunkNaming::Vendor => vendor_chunk_name(context).map(str::to_string),
            ChunkNaming::PerContext => dynamic_chunk_name(context),
        }
    }
}

/// Split-chunks optimization settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    /// Default chunk kind for groups that don't restrict it
    pub chunks: ChunkKind,

    /// Maximum parallel requests at entry; `None` is unlimited
    pub max_initial_requests: Option<u32>,

    /// Minimum chunk size in bytes
    pub min_size: u64,

    /// Cache groups in declaration order
    #[serde(serialize_with = "serialize_groups")]
    pub cache_groups: Vec<CacheGroup>,
}

impl Default for SplitChunks {
    fn default() -> Self {
        Self {
            chunks: ChunkKind::All,
            max_initial_requests: None,
            min_size: 0,
            cache_groups: vec![
                CacheGroup::vendor(),
                CacheGroup::initial(),
                CacheGroup::dynamic(),
            ],
        }
    }
}

impl SplitChunks {
    /// Every `(group, chunk)` pair a module loaded as `kind` is assigned to
    pub fn assign(&self, context: &str, kind: ChunkKind) -> Vec<(&str, String)> {
        self.cache_groups
            .iter()
            .filter(|group| group.chunks.unwrap_or(self.chunks).accepts(kind))
            .filter_map(|group| {
                group
                    .chunk_name(context)
                    .map(|name| (group.key.as_str(), name))
            })
            .collect()
    }
}

fn serialize_groups<S: Serializer>(groups: &[CacheGroup], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(groups.len()))?;
    for group in groups {
        map.serialize_entry(&group.key, group)?;
    }
    map.end()
}
