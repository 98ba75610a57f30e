//! Command-line interface for Webpreset
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `inspect`: Print the generated bundler configuration
//! - `classify`: Show the chunks a module context is split into
//! - `order`: Sort chunk names into injection order
//! - `plan`: Group installed packages by vendor chunk
//! - `rules`: Show the loader chain for a file
//! - `filename`: Show the hashed name a chunk is emitted under
//! - `init`: Write a default webpreset.toml

mod classify;
mod filename;
mod init;
mod inspect;
mod order;
mod plan;
mod rules;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::config::{Config, CONFIG_FILE};

pub use classify::ClassifyCommand;
pub use filename::FilenameCommand;
pub use init::InitCommand;
pub use inspect::InspectCommand;
pub use order::OrderCommand;
pub use plan::PlanCommand;
pub use rules::RulesCommand;

/// Webpreset - a batteries-included bundler configuration preset
#[derive(Parser, Debug)]
#[command(name = "webpreset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to webpreset.toml config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the generated bundler configuration as JSON
    Inspect(InspectCommand),

    /// Show the vendor and dynamic chunks of module context paths
    Classify(ClassifyCommand),

    /// Sort chunk names into injection order
    Order(OrderCommand),

    /// Group the packages in node_modules by vendor chunk
    Plan(PlanCommand),

    /// Show the loader chain applied to a file
    Rules(RulesCommand),

    /// Show the hashed name a chunk is emitted under
    Filename(FilenameCommand),

    /// Write a default webpreset.toml
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Inspect(cmd) => cmd.execute(&self.config),
            Commands::Classify(cmd) => cmd.execute(),
            Commands::Order(cmd) => cmd.execute(),
            Commands::Plan(cmd) => cmd.execute(),
            Commands::Rules(cmd) => cmd.execute(&self.config),
            Commands::Filename(cmd) => cmd.execute(&self.config),
            Commands::Init(cmd) => cmd.execute(&self.config),
        }
    }
}

/// Load the config file named on the command line
fn load_config(config_path: &str) -> Result<Config> {
    info!("Loading configuration from {}", config_path);
    Config::load(Path::new(config_path))
}

/// Print the Webpreset banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "◆".cyan(),
        "Webpreset".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
