// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Match command for finding the route that serves a request path.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::bail;
use console::style;
use kit_routing::{Matchers, RouteCache, RouteMatch, Router};

use crate::config::Config;
use crate::discover::discover;

/// Discovers routes, loads matchers from the config and prints the route
/// that matches `path` along with its parameters.
///
/// # Errors
///
/// Fails if no route matches, so the process exits non-zero.
pub fn run(config: &Config, root: &Path, path: &str) -> anyhow::Result<()> {
    let router = discover(&config.routes_dir(root), RouteCache::new(config.routing.cache_capacity))?;
    let matchers = config.matchers()?;

    let Some(matched) = find(&router, &matchers, path)? else {
        bail!("No route matches {}", path);
    };

    println!("{} {}", style("Route:").green().bold(), matched.route.id);
    print!("{}", render(&matched));
    Ok(())
}

/// Validates matchers against the routes, then matches `path`.
pub fn find<'r>(router: &'r Router, matchers: &Matchers, path: &str) -> anyhow::Result<Option<RouteMatch<'r>>> {
    router.validate_matchers(matchers)?;
    Ok(router.match_url(path, matchers))
}

/// Renders file and parameter lines for a match, parameters sorted by name.
pub fn render(matched: &RouteMatch<'_>) -> String {
    let mut out = String::new();
    if let Some(page) = &matched.route.page {
        out.push_str(&format!("  page:     {}\n", page));
    }
    if let Some(endpoint) = &matched.route.endpoint {
        out.push_str(&format!("  endpoint: {}\n", endpoint));
    }
    for layout in &matched.route.layouts {
        out.push_str(&format!("  layout:   {}\n", layout));
    }

    let params: BTreeMap<_, _> = matched.params.iter().collect();
    for (name, value) in params {
        out.push_str(&format!("  {} = {:?}\n", name, value));
    }
    out
}
