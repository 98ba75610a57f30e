//! Configuration schema definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Preset options consumed by the configuration factory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetOptions {
    /// Build settings
    #[serde(default)]
    pub build: BuildOptions,

    /// Analysis toggles
    #[serde(default)]
    pub analysis: AnalysisOptions,

    /// Development server settings
    #[serde(default)]
    pub dev: DevOptions,
}

/// Build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Production build (hashed chunk names, minification, CSS extraction)
    #[serde(default)]
    pub is_production: bool,

    /// Application entry file
    #[serde(default = "default_entry")]
    pub entry: String,

    /// HTML template path
    #[serde(default = "default_template")]
    pub template: String,

    /// Favicon path, empty for none
    #[serde(default)]
    pub favicon: String,

    /// Base URL emitted assets are served from
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// TinyPNG API key; images are compressed when set
    #[serde(default)]
    pub tinify_api_key: String,

    /// Module aliases
    #[serde(default)]
    pub alias: BTreeMap<String, String>,

    /// Compile-time global constants
    #[serde(default)]
    pub global_constants: BTreeMap<String, serde_json::Value>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            is_production: false,
            entry: default_entry(),
            template: default_template(),
            favicon: String::new(),
            public_path: default_public_path(),
            tinify_api_key: String::new(),
            alias: BTreeMap::new(),
            global_constants: BTreeMap::new(),
        }
    }
}

fn default_entry() -> String {
    "./src/index.js".to_string()
}

fn default_template() -> String {
    "src/index.ejs".to_string()
}

fn default_public_path() -> String {
    "/".to_string()
}

/// Analysis toggles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Emit a bundle analyzer report
    #[serde(default)]
    pub need_analyzer: bool,

    /// Measure plugin and loader timings
    #[serde(default)]
    pub need_speed_measure: bool,
}

/// Development server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevOptions {
    /// Port to run dev server on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Proxy rules keyed by path prefix
    #[serde(default)]
    pub proxy: BTreeMap<String, ProxyRule>,
}

impl Default for DevOptions {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            proxy: BTreeMap::new(),
        }
    }
}

fn default_port() -> u16 {
    8001
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Proxy rule for dev server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRule {
    /// Target URL
    pub target: String,

    /// Rewrite the Host header to the target's
    #[serde(default)]
    pub change_origin: bool,

    /// Verify the target's TLS certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    /// Path rewrite patterns
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path_rewrite: BTreeMap<String, String>,
}
