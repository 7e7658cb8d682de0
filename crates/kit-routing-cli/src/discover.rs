// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route discovery.
//!
//! Walks the routes directory for `+` files and hands their relative paths
//! to [`Router::with_paths`], which groups them into routes.

use std::path::Path;

use anyhow::{bail, Context};
use glob::{glob, Pattern};
use kit_routing::{RouteCache, Router};

/// Lists route files (`+page.*`, `+server.*`, `+layout.*`, ...) under
/// `routes_dir`, as `/`-separated paths relative to it, sorted.
pub fn route_files(routes_dir: &Path) -> anyhow::Result<Vec<String>> {
    if !routes_dir.is_dir() {
        bail!("Routes directory not found: {}", routes_dir.display());
    }

    let root = Pattern::escape(&routes_dir.to_string_lossy());
    let pattern = format!("{}/**/+*", root);

    let mut files = Vec::new();
    for path in glob(&pattern).context("Invalid routes directory pattern")?.flatten() {
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(routes_dir).unwrap_or(&path);
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(relative);
    }

    files.sort();
    tracing::debug!("Discovered {} route files in {}", files.len(), routes_dir.display());
    Ok(files)
}

/// Discovers routes under `routes_dir` and builds a router compiling through
/// `cache`.
pub fn discover(routes_dir: &Path, cache: RouteCache) -> anyhow::Result<Router> {
    let files = route_files(routes_dir)?;
    let router = Router::with_cache(cache)
        .with_paths(&files)
        .with_context(|| format!("Failed to build routes from {}", routes_dir.display()))?;
    Ok(router)
}
