//! Development server settings
//!
//! The dev server itself is run by the bundler runtime. This module builds the
//! settings it is started with:
//! - bind address
//! - history API fallback, hot reload and the error overlay
//! - API proxy rules

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{DevOptions, ProxyRule};

/// Compile error overlay settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub errors: bool,
}

/// Development server settings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Serve index.html for unknown routes
    pub history_api_fallback: bool,

    /// Open browser on start
    pub open: bool,

    /// Hot module replacement
    pub hot: bool,

    /// Inline the live-reload client
    pub inline: bool,

    /// Show compile errors in the page
    pub overlay: Overlay,

    /// Proxy rules keyed by path prefix
    pub proxy: BTreeMap<String, ProxyRule>,
}

impl DevServerConfig {
    /// Create dev server settings from options
    pub fn new(options: &DevOptions) -> Self {
        Self {
            port: options.port,
            host: options.host.clone(),
            history_api_fallback: true,
            open: true,
            hot: true,
            inline: true,
            overlay: Overlay { errors: true },
            proxy: options.proxy.clone(),
        }
    }

    /// URL the server is reachable at
    pub fn url(&self) -> String {
        let host = if self.host == "0.0.0.0" {
            "localhost"
        } else {
            self.host.as_str()
        };
        format!("http://{}:{}", host, self.port)
    }
}
