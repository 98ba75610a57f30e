//! Inspect command implementation

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use super::load_config;
use crate::factory::create_config;

/// Print the generated bundler configuration as JSON
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Generate the production configuration
    #[arg(long)]
    pub production: bool,

    /// Include the bundle analyzer
    #[arg(long)]
    pub analyze: bool,

    /// Include the speed measure wrapper
    #[arg(long)]
    pub measure: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InspectCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();
        let config = load_config(config_path)?;

        let mut options = config.options.clone();
        options.build.is_production |= self.production;
        options.analysis.need_analyzer |= self.analyze;
        options.analysis.need_speed_measure |= self.measure;

        let build_config = create_config(&config.root, &options);
        let document = build_config.finalize(config.custom_json()?)?;
        let json = serde_json::to_string_pretty(&document)?;

        info!("Generated configuration in {:?}", start.elapsed());
        info!("Dev server address: {}", build_config.dev_server.url());

        match &self.output {
            Some(path) => {
                fs::write(path, format!("{}\n", json))
                    .with_context(|| format!("Failed to write {}", path.display()))?;

                eprintln!(
                    "{} Wrote {} configuration to {}",
                    "✓".green().bold(),
                    if options.build.is_production { "production" } else { "development" },
                    path.display().to_string().cyan()
                );
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}
