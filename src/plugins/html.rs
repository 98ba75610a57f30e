//! HTML document generation

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::Plugin;
use crate::order;

/// Marker identifying emitted async chunk assets
pub const PREFETCH_MARKER: &str = r"\.dynamic\.";

static PREFETCH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(PREFETCH_MARKER).unwrap());

/// Renders the HTML template and injects chunk tags in load order
#[derive(Debug, Clone)]
pub struct HtmlPlugin {
    pub template: String,
    pub favicon: String,
    pub public_path: String,
}

impl HtmlPlugin {
    /// Public URLs of async chunk assets worth prefetching
    ///
    /// Keeps input order; assets are taken as emitted file names.
    pub fn prefetch_assets<S: AsRef<str>>(&self, assets: &[S]) -> Vec<String> {
        assets
            .iter()
            .map(|asset| asset.as_ref())
            .filter(|asset| PREFETCH_REGEX.is_match(asset))
            .map(|asset| format!("{}{}", self.public_path, asset))
            .collect()
    }
}

impl Plugin for HtmlPlugin {
    fn name(&self) -> &str {
        "HtmlWebpackPlugin"
    }

    fn options(&self) -> Value {
        json!({
            "template": self.template,
            "favicon": self.favicon,
            "chunksSortMode": {
                "byPrefix": order::LOAD_ORDER,
            },
            "prefetch": PREFETCH_MARKER,
        })
    }

    fn sort_chunks(&self, chunks: &mut [String]) -> bool {
        order::sort_chunks(chunks);
        true
    }

    fn template_parameters(&self, assets: &[String]) -> Option<Map<String, Value>> {
        let mut params = Map::new();
        params.insert("prefetchAssets".to_string(), json!(self.prefetch_assets(assets)));
        Some(params)
    }
}
