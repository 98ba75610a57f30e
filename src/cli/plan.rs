//! Plan command implementation

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;
use walkdir::WalkDir;

use crate::chunks::{classify, package_name_from_context};
use crate::order::sort_chunks;
use crate::utils::{path_to_module_id, relative_path};

/// Group the packages in node_modules by vendor chunk
#[derive(Args, Debug)]
pub struct PlanCommand {
    /// Project root containing node_modules
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

impl PlanCommand {
    pub fn execute(&self) -> Result<()> {
        let root = fs::canonicalize(&self.root)
            .with_context(|| format!("Failed to resolve project root: {}", self.root.display()))?;
        let node_modules = root.join("node_modules");

        if !node_modules.is_dir() {
            anyhow::bail!("No node_modules directory in {}", root.display());
        }

        let groups = plan(&node_modules)?;

        let mut chunks: Vec<&str> = groups.keys().copied().collect();
        sort_chunks(&mut chunks);

        let mut total = 0;
        for chunk in &chunks {
            let packages = &groups[chunk];
            total += packages.len();

            println!("{} ({})", chunk.bold().green(), packages.len());
            for package in packages {
                println!("  {}", package);
            }
        }

        eprintln!(
            "\n{} {} package(s) in {} chunk(s)\n",
            "✓".green().bold(),
            total,
            chunks.len()
        );

        Ok(())
    }
}

/// Packages under `node_modules`, grouped by vendor chunk
pub fn plan(node_modules: &Path) -> Result<BTreeMap<&'static str, Vec<String>>> {
    let mut groups: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    for package_dir in collect_packages(node_modules)? {
        let context = path_to_module_id(&package_dir);
        let Some(name) = package_name_from_context(&context) else {
            continue;
        };

        let chunk = classify(name, &context);
        let shown = relative_path(node_modules, &package_dir).unwrap_or(context.clone());
        debug!("{} -> {}", shown, chunk);

        groups.entry(chunk).or_default().push(shown);
    }

    Ok(groups)
}

/// Package directories, descending one level into `@scope` directories
fn collect_packages(node_modules: &Path) -> Result<Vec<PathBuf>> {
    let mut packages = Vec::new();
    let mut walker = WalkDir::new(node_modules)
        .min_depth(1)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.context("Failed to read node_modules")?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let is_top_level = entry.depth() == 1;

        if name.starts_with('.') {
            if is_top_level {
                walker.skip_current_dir();
            }
            continue;
        }

        if is_top_level {
            if name.starts_with('@') {
                continue;
            }
            walker.skip_current_dir();
        }

        packages.push(entry.path().to_path_buf());
    }

    Ok(packages)
}
