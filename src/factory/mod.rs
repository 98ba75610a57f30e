//! Configuration factory
//!
//! Turns a project path and preset options into a complete bundler
//! configuration: output naming, vendor chunk splitting, resolution, plugins,
//! module rules and dev server settings.

mod merge;
mod output;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::chunks::SplitChunks;
use crate::config::PresetOptions;
use crate::plugins::{
    BundleAnalyzerPlugin, ContextReplacementPlugin, DefinePlugin, HtmlPlugin,
    LodashModuleReplacementPlugin, MiniCssExtractPlugin, OptimizeCssAssetsPlugin, PluginSet,
    SpeedMeasurePlugin,
};
use crate::rules::ModuleRules;
use crate::server::DevServerConfig;

pub use merge::merge;
pub use output::{filename_template, OutputConfig};

/// File extensions tried when resolving imports, in order
pub const RESOLVE_EXTENSIONS: [&str; 7] = [".wasm", ".mjs", ".js", ".json", ".jsx", ".ts", ".tsx"];

/// Optimization settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    /// Minify emitted code
    pub minimize: bool,

    /// Vendor chunk splitting
    pub split_chunks: SplitChunks,
}

/// Import resolution settings
#[derive(Debug, Clone, Serialize)]
pub struct ResolveConfig {
    pub alias: BTreeMap<String, String>,
    pub extensions: Vec<String>,
}

/// Module settings
#[derive(Debug, Clone, Serialize)]
pub struct ModuleConfig {
    pub rules: ModuleRules,
}

/// A complete bundler configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Application entry file
    pub entry: String,

    /// Output settings
    pub output: OutputConfig,

    /// `production` for production builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Stats preset for production builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,

    pub optimization: Optimization,

    pub resolve: ResolveConfig,

    pub plugins: PluginSet,

    pub module: ModuleConfig,

    pub dev_server: DevServerConfig,
}

/// Create the configuration for a project
pub fn create_config(project: &Path, options: &PresetOptions) -> BuildConfig {
    let build = &options.build;
    let is_production = build.is_production;

    debug!(
        "Creating {} config for {}",
        if is_production { "production" } else { "development" },
        project.display()
    );

    let output = OutputConfig::new(project, &build.public_path, is_production);
    debug!("Output: {} -> {}", output.filename, output.path.display());

    let optimization = Optimization {
        minimize: is_production,
        split_chunks: SplitChunks::default(),
    };
    debug!("Split chunks: {} cache groups", optimization.split_chunks.cache_groups.len());

    let resolve = ResolveConfig {
        alias: build.alias.clone(),
        extensions: RESOLVE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    };

    let plugins = create_plugins(options);
    debug!("Plugins: {}", plugins.names().join(", "));

    let rules = ModuleRules::new(project, options);
    debug!("Module rules: {}", rules.rules.len());

    BuildConfig {
        entry: build.entry.clone(),
        output,
        mode: is_production.then(|| "production".to_string()),
        stats: is_production.then(|| "minimal".to_string()),
        optimization,
        resolve,
        plugins,
        module: ModuleConfig { rules },
        dev_server: DevServerConfig::new(&options.dev),
    }
}

fn create_plugins(options: &PresetOptions) -> PluginSet {
    let build = &options.build;
    let mut plugins = PluginSet::new();

    plugins.register(Arc::new(DefinePlugin {
        definitions: build.global_constants.clone(),
    }));
    plugins.register(Arc::new(HtmlPlugin {
        template: build.template.clone(),
        favicon: build.favicon.clone(),
        public_path: build.public_path.clone(),
    }));
    plugins.register(Arc::new(MiniCssExtractPlugin {
        filename: filename_template(build.is_production, "css"),
    }));
    plugins.register(Arc::new(ContextReplacementPlugin::moment_locales()));
    plugins.register(Arc::new(LodashModuleReplacementPlugin::default()));

    if build.is_production {
        plugins.register(Arc::new(OptimizeCssAssetsPlugin));
    }

    if options.analysis.need_analyzer {
        plugins.register(Arc::new(BundleAnalyzerPlugin));
    }

    if options.analysis.need_speed_measure {
        plugins.register_first(Arc::new(SpeedMeasurePlugin));
    }

    plugins
}

impl BuildConfig {
    /// Serialize and merge a custom configuration over the generated one
    pub fn finalize(&self, custom: Value) -> Result<Value> {
        let mut document =
            serde_json::to_value(self).context("Failed to serialize build configuration")?;

        merge(&mut document, custom);

        Ok(document)
    }
}
