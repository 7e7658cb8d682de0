// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `kit-routing.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [routing]
//! routes_dir = "src/routes"
//! cache_capacity = 256
//!
//! [matchers]
//! integer = "^[0-9]+$"
//! locale = "^(en|de|fr)$"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use kit_routing::{Matchers, RegexMatcher, DEFAULT_CACHE_CAPACITY};
use serde::Deserialize;

/// Main configuration structure loaded from `kit-routing.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Routing configuration.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Parameter matchers, as name → regular expression.
    #[serde(default)]
    pub matchers: BTreeMap<String, String>,
}

/// Routing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Directory containing route files (default: "src/routes").
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// Number of compiled routes to keep cached (default: 256).
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_routes_dir() -> String {
    "src/routes".to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Builds the matcher registry from the `[matchers]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if a matcher pattern is not a valid regex.
    pub fn matchers(&self) -> anyhow::Result<Matchers> {
        let mut matchers = Matchers::new();
        for (name, pattern) in &self.matchers {
            let matcher = RegexMatcher::new(name, pattern)?;
            matchers.insert(name.clone(), matcher);
        }
        Ok(matchers)
    }

    /// Resolves the routes directory against the project root.
    pub fn routes_dir(&self, root: &Path) -> std::path::PathBuf {
        root.join(&self.routing.routes_dir)
    }
}
