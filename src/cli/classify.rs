//! Classify command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::chunks::{classify, dynamic_chunk_name, package_name_from_context};

/// Show the vendor and dynamic chunks of module context paths
#[derive(Args, Debug)]
pub struct ClassifyCommand {
    /// Module context paths (directories of importing modules)
    #[arg(required = true)]
    pub contexts: Vec<String>,
}

impl ClassifyCommand {
    pub fn execute(&self) -> Result<()> {
        for context in &self.contexts {
            println!("{}", context.bold());

            let Some(package) = package_name_from_context(context) else {
                println!("  {}", "application code".dimmed());
                continue;
            };

            println!("  package: {}", package);
            println!("  bundle:  {}", classify(package, context).green());
            match dynamic_chunk_name(context) {
                Some(name) => println!("  dynamic: {}", name.cyan()),
                None => println!("  dynamic: {}", "-".dimmed()),
            }
        }

        Ok(())
    }
}
