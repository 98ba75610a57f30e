//! Configuration handling for Webpreset
//!
//! Parses and validates webpreset.toml configuration files.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub use schema::*;

/// Default configuration file name
pub const CONFIG_FILE: &str = "webpreset.toml";

/// Top-level tables the configuration file may contain
const SECTIONS: &[&str] = &["build", "analysis", "dev", "custom"];

/// Invalid option values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("build.entry must not be empty")]
    EmptyEntry,

    #[error("dev.port must be non-zero")]
    InvalidPort,

    #[error("build.public_path '{0}' must end with '/'")]
    PublicPath(String),

    #[error("proxy path '{0}' must start with '/'")]
    ProxyPath(String),

    #[error("proxy target '{target}' for '{path}' is not an absolute URL")]
    ProxyTarget {
        path: String,
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("proxy target '{target}' for '{path}' must use http, https, ws or wss")]
    ProxyScheme { path: String, target: String },
}

/// Schemes the dev server can forward to
const PROXY_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Options passed to the configuration factory
    #[serde(flatten)]
    pub options: PresetOptions,

    /// Extra configuration merged over the generated one
    #[serde(default)]
    pub custom: toml::Table,

    /// Project root (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let mut config = Self::parse(&content)?;

        config.root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        for key in unknown_sections(&table) {
            warn!("Ignoring unknown section '{}' in {}", key, CONFIG_FILE);
        }

        let config = Config::deserialize(toml::Value::Table(table))
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        config.options.validate()?;

        Ok(config)
    }

    /// Create a default configuration rooted at `root`
    pub fn default_config(root: PathBuf) -> Self {
        Self {
            options: PresetOptions::default(),
            custom: toml::Table::new(),
            root,
        }
    }

    /// Custom configuration as JSON
    pub fn custom_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.custom).context("Failed to convert [custom] table")
    }
}

/// Top-level keys that no option section reads
pub fn unknown_sections(table: &toml::Table) -> Vec<&str> {
    table
        .keys()
        .map(String::as_str)
        .filter(|key| !SECTIONS.contains(key))
        .collect()
}

impl PresetOptions {
    /// Validate option values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.build.entry.trim().is_empty() {
            return Err(ConfigError::EmptyEntry);
        }

        if self.dev.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if !self.build.public_path.ends_with('/') {
            return Err(ConfigError::PublicPath(self.build.public_path.clone()));
        }

        for (path, rule) in &self.dev.proxy {
            if !path.starts_with('/') {
                return Err(ConfigError::ProxyPath(path.clone()));
            }

            let target_error = |source: url::ParseError| ConfigError::ProxyTarget {
                path: path.clone(),
                target: rule.target.clone(),
                source,
            };

            // `localhost:3000` parses with `localhost` as the scheme
            let url = Url::parse(&rule.target).map_err(target_error)?;
            if url.host_str().is_none() {
                return Err(target_error(url::ParseError::EmptyHost));
            }

            if !PROXY_SCHEMES.contains(&url.scheme()) {
                return Err(ConfigError::ProxyScheme {
                    path: path.clone(),
                    target: rule.target.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        let options = &config.options;

        assert_eq!(options, &PresetOptions::default());
        assert!(!options.build.is_production);
        assert_eq!(options.build.entry, "./src/index.js");
        assert_eq!(options.build.template, "src/index.ejs");
        assert_eq!(options.build.public_path, "/");
        assert_eq!(options.build.favicon, "");
        assert!(!options.analysis.need_analyzer);
        assert!(!options.analysis.need_speed_measure);
        assert_eq!(options.dev.port, 8001);
        assert_eq!(options.dev.host, "0.0.0.0");
        assert!(options.dev.proxy.is_empty());
        assert!(config.custom.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
[build]
is_production = true
entry = "./src/main.tsx"
public_path = "/static/"

[build.alias]
"@" = "src"

[build.global_constants]
API_BASE = "https://api.example.com"
DEBUG = false

[analysis]
need_analyzer = true

[dev]
port = 9000

[dev.proxy."/api"]
target = "http://localhost:3000"
changeOrigin = true

[dev.proxy."/api".pathRewrite]
"^/api" = ""

[custom.output]
crossOriginLoading = "anonymous"
"#,
        )
        .unwrap();

        let options = &config.options;
        assert!(options.build.is_production);
        assert_eq!(options.build.entry, "./src/main.tsx");
        assert_eq!(options.build.alias["@"], "src");
        assert_eq!(options.build.global_constants["DEBUG"], serde_json::json!(false));
        assert!(options.analysis.need_analyzer);
        assert_eq!(options.dev.port, 9000);
        assert_eq!(options.dev.host, "0.0.0.0");

        let rule = &options.dev.proxy["/api"];
        assert_eq!(rule.target, "http://localhost:3000");
        assert!(rule.change_origin);
        assert_eq!(rule.path_rewrite["^/api"], "");

        assert_eq!(
            config.custom_json().unwrap()["output"]["crossOriginLoading"],
            "anonymous"
        );
    }

    #[test]
    fn test_validation() {
        let mut options = PresetOptions::default();
        assert!(options.validate().is_ok());

        options.build.entry = " ".to_string();
        assert!(matches!(options.validate(), Err(ConfigError::EmptyEntry)));

        let mut options = PresetOptions::default();
        options.dev.port = 0;
        assert!(matches!(options.validate(), Err(ConfigError::InvalidPort)));

        let mut options = PresetOptions::default();
        options.build.public_path = "/static".to_string();
        assert!(matches!(options.validate(), Err(ConfigError::PublicPath(_))));
    }

    #[test]
    fn test_proxy_validation() {
        let rule = |target: &str| ProxyRule {
            target: target.to_string(),
            change_origin: false,
            secure: None,
            path_rewrite: Default::default(),
        };

        let mut options = PresetOptions::default();
        options.dev.proxy.insert("api".to_string(), rule("http://localhost:3000"));
        assert!(matches!(options.validate(), Err(ConfigError::ProxyPath(_))));

        let mut options = PresetOptions::default();
        options.dev.proxy.insert("/api".to_string(), rule("localhost"));
        let err = options.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "proxy target 'localhost' for '/api' is not an absolute URL"
        );
    }

    #[test]
    fn test_proxy_target_needs_host() {
        let mut options = PresetOptions::default();
        options.dev.proxy.insert(
            "/api".to_string(),
            ProxyRule {
                target: "localhost:3000".to_string(),
                change_origin: false,
                secure: None,
                path_rewrite: Default::default(),
            },
        );
        assert!(matches!(
            options.validate(),
            Err(ConfigError::ProxyTarget {
                source: url::ParseError::EmptyHost,
                ..
            })
        ));

        let proxy = options.dev.proxy.get_mut("/api").unwrap();
        proxy.target = "ftp://files.example.com".to_string();
        assert!(matches!(options.validate(), Err(ConfigError::ProxyScheme { .. })));

        let proxy = options.dev.proxy.get_mut("/api").unwrap();
        proxy.target = "ws://localhost:3000/socket".to_string();
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        assert!(Config::parse("[dev]\nport = 0\n").is_err());
        assert!(Config::parse("[build]\nentry = 3\n").is_err());
    }

    #[test]
    fn test_unknown_sections() {
        let table: toml::Table = toml::from_str(
            "[biuld]\nis_production = true\n\n[dev]\nport = 9000\n\n[custom]\ndevtool = false\n",
        )
        .unwrap();
        assert_eq!(unknown_sections(&table), vec!["biuld"]);

        let config = Config::parse("[biuld]\nis_production = true\n").unwrap();
        assert!(!config.options.build.is_production);
    }

    #[test]
    fn test_load_sets_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[build]\nentry = \"./src/app.js\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.options.build.entry, "./src/app.js");
    }
}
