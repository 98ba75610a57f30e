//! Module rules
//!
//! Declares which loader chain the bundler runtime applies to each kind of
//! source file. The loaders themselves are external; this module only decides
//! the chain and its options.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::PresetOptions;
use crate::utils::{path_to_module_id, serialize_regex};

/// Inline asset size limit for url-loader, in bytes
pub const INLINE_LIMIT: u64 = 100_000;

/// Class name pattern for CSS modules
pub const CSS_MODULES_IDENT: &str = "[name]__[local]___[hash:base64:5]";

/// A loader with optional options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseEntry {
    pub loader: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl UseEntry {
    pub fn loader(name: &str) -> Self {
        Self {
            loader: name.to_string(),
            options: None,
        }
    }

    pub fn with_options(name: &str, options: Value) -> Self {
        Self {
            loader: name.to_string(),
            options: Some(options),
        }
    }
}

/// A file-matching rule and its loader chain
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRule {
    /// File path pattern
    #[serde(serialize_with = "serialize_regex")]
    pub test: Regex,

    /// Loaders, applied last to first by the runtime
    #[serde(rename = "use")]
    pub uses: Vec<UseEntry>,

    /// Directories the rule is restricted to; empty means everywhere
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
}

impl ModuleRule {
    fn new(test: &str, uses: Vec<UseEntry>) -> Self {
        Self {
            test: Regex::new(test).unwrap(),
            uses,
            include: Vec::new(),
        }
    }

    fn include(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include = dirs;
        self
    }

    /// Whether the rule applies to a file
    pub fn matches(&self, path: &Path) -> bool {
        if !self.test.is_match(&path_to_module_id(path)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|dir| path.starts_with(dir))
    }

    /// Loader names in declaration order
    pub fn loaders(&self) -> impl Iterator<Item = &str> {
        self.uses.iter().map(|entry| entry.loader.as_str())
    }
}

/// The ordered rule list
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ModuleRules {
    pub rules: Vec<ModuleRule>,
}

impl ModuleRules {
    /// Build the rule list for a project
    pub fn new(project: &Path, options: &PresetOptions) -> Self {
        let is_production = options.build.is_production;
        let app_dirs = vec![project.join("src"), project.join("demo")];

        let style_loader = |insert_head: bool| {
            if is_production {
                UseEntry::loader("mini-css-extract-plugin/loader")
            } else if insert_head {
                UseEntry::with_options("style-loader", json!({ "insert": "head" }))
            } else {
                UseEntry::loader("style-loader")
            }
        };

        let less_loader = || UseEntry::with_options("less-loader", json!({ "javascriptEnabled": true }));

        let url_loader = || UseEntry::with_options("url-loader", json!({ "limit": INLINE_LIMIT }));

        let mut image_loaders = vec![url_loader()];
        if !options.build.tinify_api_key.is_empty() {
            image_loaders.push(UseEntry::with_options(
                "webpack-tinypng-loader",
                json!({ "apikey": options.build.tinify_api_key }),
            ));
        }

        let rules = vec![
            ModuleRule::new(
                r"\.less$",
                vec![
                    style_loader(false),
                    UseEntry::with_options(
                        "css-loader",
                        json!({
                            "modules": { "localIdentName": CSS_MODULES_IDENT },
                            "importLoaders": 1
                        }),
                    ),
                    less_loader(),
                ],
            )
            .include(app_dirs.clone()),
            ModuleRule::new(
                r"\.less$",
                vec![style_loader(true), UseEntry::loader("css-loader"), less_loader()],
            )
            .include(vec![project.join("node_modules").join("antd")]),
            ModuleRule::new(
                r"\.css$",
                vec![
                    UseEntry::loader("style-loader"),
                    UseEntry::loader("thread-loader"),
                    UseEntry::loader("css-loader"),
                ],
            ),
            ModuleRule::new(
                r"\.jsx?$",
                vec![
                    UseEntry::loader("thread-loader"),
                    babel_loader(&["@babel/preset-env", "@babel/preset-react"]),
                ],
            )
            .include(app_dirs.clone()),
            ModuleRule::new(
                r"\.tsx?$",
                vec![
                    UseEntry::loader("thread-loader"),
                    babel_loader(&[
                        "@babel/preset-env",
                        "@babel/preset-react",
                        "@babel/preset-typescript",
                    ]),
                ],
            )
            .include(app_dirs),
            ModuleRule::new(
                r"\.svg$",
                vec![
                    url_loader(),
                    UseEntry::with_options(
                        "svgo-loader",
                        json!({ "plugins": [{ "removeViewBox": false }] }),
                    ),
                ],
            ),
            ModuleRule::new(r"\.(png|jpe?g)$", image_loaders),
            ModuleRule::new(r"\.(woff|woff2|eot|ttf|gif)$", vec![url_loader()]),
            ModuleRule::new(
                r"\.(txt|xlsx|xls)$",
                vec![UseEntry::with_options(
                    "file-loader",
                    json!({ "outputPath": "assets" }),
                )],
            ),
            ModuleRule::new(r"\.(html)$", vec![UseEntry::loader("html-loader")]),
        ];

        Self { rules }
    }

    /// Rules that apply to a file
    pub fn matching<'a, 'p>(&'a self, path: &'p Path) -> impl Iterator<Item = &'a ModuleRule> + 'p
    where
        'a: 'p,
    {
        self.rules.iter().filter(move |rule| rule.matches(path))
    }

    /// Loader chain applied to a file, rule by rule
    pub fn loaders_for(&self, path: &Path) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .flat_map(|rule| rule.loaders())
            .collect()
    }
}

fn babel_loader(presets: &[&str]) -> UseEntry {
    UseEntry::with_options(
        "babel-loader",
        json!({
            "presets": presets,
            "plugins": [
                ["@babel/plugin-proposal-decorators", { "legacy": true }],
                ["@babel/plugin-proposal-class-properties", { "loose": true }],
                "@babel/plugin-proposal-export-default-from",
                ["import", { "libraryName": "antd", "libraryDirectory": "es", "style": true }],
                "lodash"
            ]
        }),
    )
}
