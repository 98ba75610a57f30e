//! Webpreset library
//!
//! Core functionality for the Webpreset configuration preset.

pub mod chunks;
pub mod cli;
pub mod config;
pub mod factory;
pub mod order;
pub mod plugins;
pub mod rules;
pub mod server;
pub mod utils;

pub use chunks::{classify, dynamic_chunk_name, package_name_from_context};
pub use cli::Cli;
pub use config::{Config, PresetOptions};
pub use factory::{create_config, BuildConfig};
pub use order::{compare, sort_chunks};
