//! Plugin instantiations for the generated configuration
//!
//! Each plugin serializes to a `{ name, options }` descriptor for the bundler
//! runtime. Plugins that make decisions on the runtime's behalf (chunk
//! ordering, template parameters, context filtering) expose them as hooks.

mod html;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub use html::{HtmlPlugin, PREFETCH_MARKER};

/// Result of a context filter hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFilter {
    /// Continue to next plugin
    Skip,
    /// Include the request in the context module
    Keep,
    /// Leave the request out
    Drop,
}

/// Plugin trait - implement this to add a plugin to the generated config
pub trait Plugin: Send + Sync + fmt::Debug {
    /// Plugin name as the runtime knows it
    fn name(&self) -> &str;

    /// Constructor options
    fn options(&self) -> Value {
        Value::Object(Map::new())
    }

    /// Reorder chunk names for injection
    /// Return false to let other plugins handle it
    fn sort_chunks(&self, _chunks: &mut [String]) -> bool {
        false
    }

    /// Extra parameters exposed to the HTML template
    fn template_parameters(&self, _assets: &[String]) -> Option<Map<String, Value>> {
        None
    }

    /// Decide whether a request inside a context module is bundled
    fn filter_context(&self, _context: &str, _request: &str) -> ContextFilter {
        ContextFilter::Skip
    }
}

/// Ordered plugin list
#[derive(Debug, Clone, Default)]
pub struct PluginSet {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Register a plugin ahead of all others
    pub fn register_first(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.insert(0, plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugin names in order
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Find a plugin by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// Run sort_chunks hooks until one handles the sort
    pub fn sort_chunks(&self, chunks: &mut [String]) -> bool {
        self.plugins.iter().any(|plugin| plugin.sort_chunks(chunks))
    }

    /// Run template_parameters hooks, later plugins overriding earlier keys
    pub fn template_parameters(&self, assets: &[String]) -> Map<String, Value> {
        let mut params = Map::new();
        for plugin in &self.plugins {
            if let Some(extra) = plugin.template_parameters(assets) {
                params.extend(extra);
            }
        }
        params
    }

    /// Run filter_context hooks; requests are kept unless a plugin drops them
    pub fn keeps_context_request(&self, context: &str, request: &str) -> bool {
        for plugin in &self.plugins {
            match plugin.filter_context(context, request) {
                ContextFilter::Skip => continue,
                ContextFilter::Keep => return true,
                ContextFilter::Drop => return false,
            }
        }
        true
    }
}

impl Serialize for PluginSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.plugins.len()))?;
        for plugin in &self.plugins {
            seq.serialize_element(&Descriptor(plugin.as_ref()))?;
        }
        seq.end()
    }
}

struct Descriptor<'a>(&'a dyn Plugin);

impl Serialize for Descriptor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", self.0.name())?;
        map.serialize_entry("options", &self.0.options())?;
        map.end()
    }
}

/// Compile-time constants
#[derive(Debug, Clone)]
pub struct DefinePlugin {
    pub definitions: BTreeMap<String, Value>,
}

impl Plugin for DefinePlugin {
    fn name(&self) -> &str {
        "DefinePlugin"
    }

    fn options(&self) -> Value {
        json!(self.definitions)
    }
}

/// Extracts CSS into separate files
#[derive(Debug, Clone)]
pub struct MiniCssExtractPlugin {
    pub filename: String,
}

impl Plugin for MiniCssExtractPlugin {
    fn name(&self) -> &str {
        "MiniCssExtractPlugin"
    }

    fn options(&self) -> Value {
        json!({ "filename": self.filename })
    }
}

/// Restricts which files of a context module are bundled
#[derive(Debug, Clone)]
pub struct ContextReplacementPlugin {
    /// Context directories the plugin applies to
    pub resource: Regex,
    /// Requests kept inside a matching context
    pub new_content: Regex,
}

impl ContextReplacementPlugin {
    /// Keep only the English and Chinese moment.js locales
    pub fn moment_locales() -> Self {
        Self {
            resource: Regex::new(r"moment[/\\]locale$").unwrap(),
            new_content: Regex::new(r"en|zh-cn|zh-tw").unwrap(),
        }
    }
}

impl Plugin for ContextReplacementPlugin {
    fn name(&self) -> &str {
        "ContextReplacementPlugin"
    }

    fn options(&self) -> Value {
        json!({
            "resourceRegExp": self.resource.as_str(),
            "newContentRegExp": self.new_content.as_str()
        })
    }

    fn filter_context(&self, context: &str, request: &str) -> ContextFilter {
        if !self.resource.is_match(context) {
            return ContextFilter::Skip;
        }

        if self.new_content.is_match(request) {
            ContextFilter::Keep
        } else {
            ContextFilter::Drop
        }
    }
}

/// lodash feature sets kept by the module replacement
pub const LODASH_FEATURES: [&str; 16] = [
    "shorthands",
    "cloning",
    "currying",
    "caching",
    "collections",
    "exotics",
    "guards",
    "metadata",
    "deburring",
    "unicode",
    "chaining",
    "memoizing",
    "coercions",
    "flattening",
    "paths",
    "placeholders",
];

/// Replaces lodash modules with smaller feature-limited variants
#[derive(Debug, Clone)]
pub struct LodashModuleReplacementPlugin {
    pub features: Vec<&'static str>,
}

impl Default for LodashModuleReplacementPlugin {
    fn default() -> Self {
        Self {
            features: LODASH_FEATURES.to_vec(),
        }
    }
}

impl Plugin for LodashModuleReplacementPlugin {
    fn name(&self) -> &str {
        "LodashModuleReplacementPlugin"
    }

    fn options(&self) -> Value {
        let features = self
            .features
            .iter()
            .map(|feature| (feature.to_string(), Value::Bool(true)))
            .collect();
        Value::Object(features)
    }
}

/// CSS minification
#[derive(Debug, Clone, Default)]
pub struct OptimizeCssAssetsPlugin;

impl Plugin for OptimizeCssAssetsPlugin {
    fn name(&self) -> &str {
        "OptimizeCssAssetsPlugin"
    }
}

/// Bundle size report
#[derive(Debug, Clone, Default)]
pub struct BundleAnalyzerPlugin;

impl Plugin for BundleAnalyzerPlugin {
    fn name(&self) -> &str {
        "BundleAnalyzerPlugin"
    }
}

/// Times every other plugin and loader
#[derive(Debug, Clone, Default)]
pub struct SpeedMeasurePlugin;

impl Plugin for SpeedMeasurePlugin {
    fn name(&self) -> &str {
        "SpeedMeasurePlugin"
    }

    fn options(&self) -> Value {
        json!({ "wrapsConfig": true })
    }
}
