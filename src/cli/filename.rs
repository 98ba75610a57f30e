//! Filename command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::load_config;
use crate::factory::OutputConfig;

/// Show the hashed name a chunk is emitted under
#[derive(Args, Debug)]
pub struct FilenameCommand {
    /// Chunk name
    pub chunk: String,

    /// Built chunk contents to hash
    pub file: PathBuf,

    /// Use the production filename template
    #[arg(long)]
    pub production: bool,
}

impl FilenameCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let config = load_config(config_path)?;
        let is_production = config.options.build.is_production || self.production;
        let output = OutputConfig::new(&config.root, &config.options.build.public_path, is_production);

        let content = fs::read(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        println!("{}", output.chunk_filename(&self.chunk, &content));

        Ok(())
    }
}
