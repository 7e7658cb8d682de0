// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Routes command for listing discovered routes.

use std::path::Path;

use console::style;
use kit_routing::{Route, RouteCache, Router};

use crate::config::Config;
use crate::discover::discover;

/// Discovers the project's routes and prints them in priority order.
pub fn run(config: &Config, root: &Path) -> anyhow::Result<()> {
    let routes_dir = config.routes_dir(root);
    let router = discover(&routes_dir, RouteCache::new(config.routing.cache_capacity))?;

    println!(
        "{} {}",
        style("Routes in").cyan(),
        routes_dir.display()
    );

    for line in render(&router) {
        println!("{}", line);
    }

    println!(
        "{}",
        style(format!("{} routes", router.routes().len())).dim()
    );
    Ok(())
}

/// One line per route: priority, id, kind and layout count.
pub fn render(router: &Router) -> Vec<String> {
    router
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| {
            format!(
                "{:>3}. {:<40} {:<8} layouts: {}",
                i + 1,
                route.id,
                kind(route),
                route.layouts.len()
            )
        })
        .collect()
}

fn kind(route: &Route) -> &'static str {
    match (route.is_page(), route.endpoint.is_some()) {
        (true, true) => "page+api",
        (true, false) => "page",
        _ => "api",
    }
}
