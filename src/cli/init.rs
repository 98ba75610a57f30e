//! Config initialization command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Write a default webpreset.toml
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Use a TypeScript entry point
    #[arg(long)]
    pub typescript: bool,

    /// Dev server port
    #[arg(short, long, default_value = "8001")]
    pub port: u16,

    /// Overwrite an existing config file
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn execute(&self, config_path: &str) -> Result<()> {
        let path = Path::new(config_path);

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        fs::write(path, self.generate_config())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        eprintln!("  {} Created {}", "✓".green(), path.display().to_string().cyan());
        eprintln!("\n  Next steps:");
        eprintln!("    {} webpreset inspect", "→".dimmed());
        eprintln!("    {} webpreset plan", "→".dimmed());
        eprintln!();

        Ok(())
    }

    fn generate_config(&self) -> String {
        let entry = if self.typescript {
            "./src/index.tsx"
        } else {
            "./src/index.js"
        };

        format!(
r#"# Webpreset Configuration

[build]
is_production = false
entry = "{entry}"
template = "src/index.ejs"
favicon = ""
public_path = "/"
tinify_api_key = ""

[build.alias]

[build.global_constants]

[analysis]
need_analyzer = false
need_speed_measure = false

[dev]
port = {port}
host = "0.0.0.0"

# [dev.proxy."/api"]
# target = "http://localhost:3000"
# changeOrigin = true

# Merged over the generated configuration
[custom]
"#,
            entry = entry,
            port = self.port,
        )
    }
}
