//! Rules command implementation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::load_config;
use crate::factory::create_config;
use crate::utils::path_to_module_id;

/// Show the loader chain applied to a file
#[derive(Args, Debug)]
pub struct RulesCommand {
    /// Source file, relative to the current directory
    pub file: PathBuf,
}

impl RulesCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let config = load_config(config_path)?;
        let build_config = create_config(&config.root, &config.options);

        let file = if self.file.is_absolute() {
            self.file.clone()
        } else {
            std::env::current_dir()?.join(&self.file)
        };

        if let Some((context, request)) = context_request(&file) {
            if !build_config.plugins.keeps_context_request(&context, &request) {
                println!("{}", "excluded from its context module".yellow());
                return Ok(());
            }
        }

        let mut matched = false;
        for rule in build_config.module.rules.matching(&file) {
            matched = true;
            println!("{}", rule.test.as_str().bold());
            for loader in rule.loaders() {
                println!("  {}", loader);
            }
        }

        if !matched {
            println!("{}", "no rule matches".dimmed());
        }

        Ok(())
    }
}

/// Directory and `./stem` request a file is reached through from a context module
fn context_request(file: &Path) -> Option<(String, String)> {
    let context = path_to_module_id(file.parent()?);
    let stem = file.file_stem()?.to_string_lossy();
    Some((context, format!("./{}", stem)))
}
