//! Output settings

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::utils::render_filename;

/// Where and how emitted files are written
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Output directory
    pub path: PathBuf,

    /// Public URL prefix for assets
    pub public_path: String,

    /// JS filename template
    pub filename: String,

    /// Module format of the emitted library
    pub library_target: String,
}

impl OutputConfig {
    pub fn new(project: &Path, public_path: &str, is_production: bool) -> Self {
        Self {
            path: project.join("dist"),
            public_path: public_path.to_string(),
            filename: filename_template(is_production, "js"),
            library_target: "umd".to_string(),
        }
    }

    /// Emitted file name for a chunk's content
    pub fn chunk_filename(&self, chunk: &str, content: &[u8]) -> String {
        render_filename(&self.filename, chunk, content)
    }
}

/// Filename template for an extension
///
/// Production builds hash per chunk so unchanged vendor chunks keep their
/// names across releases.
pub fn filename_template(is_production: bool, ext: &str) -> String {
    if is_production {
        format!("[name].[chunkhash:8].{}", ext)
    } else {
        format!("[name].[hash:8].{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_templates() {
        assert_eq!(filename_template(true, "js"), "[name].[chunkhash:8].js");
        assert_eq!(filename_template(false, "css"), "[name].[hash:8].css");
    }

    #[test]
    fn test_output() {
        let output = OutputConfig::new(Path::new("/proj"), "/", true);

        assert_eq!(output.path, PathBuf::from("/proj/dist"));
        assert_eq!(output.library_target, "umd");
        assert_eq!(output.chunk_filename("antd", b"hello world"), "antd.b94d27b9.js");
    }
}
