//! Webpreset - a batteries-included bundler configuration preset
//!
//! Generates a complete bundler configuration for a frontend project and
//! explains the decisions it makes.
//!
//! # Features
//! - Vendor chunk splitting by package family (react, antd, lodash, ...)
//! - Per-context async chunks for dynamically imported dependencies
//! - Deterministic chunk injection order
//! - Loader rules for less/CSS modules, JSX/TSX, images and fonts
//! - Dev server settings with API proxying

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webpreset_lib::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("webpreset=debug,webpreset_lib=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("webpreset=info,webpreset_lib=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute()
}
