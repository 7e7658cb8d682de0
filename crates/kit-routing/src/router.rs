// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route tables.
//!
//! A [`Router`] holds compiled routes in priority order and dispatches a
//! request path to the first one that matches, both structurally and
//! according to its matchers. Routes can be built from bare route ids or
//! discovered from route files:
//! - `+page.*` → page routes
//! - `+server.*` → endpoints
//! - `+layout.*` → layouts, collected from the root down to each route
//! - `[param]`, `[[optional]]`, `[...rest]`, `[param=matcher]` directories →
//!   parameters
//! - `(group)` directories → grouping without affecting the URL

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::cache::RouteCache;
use crate::error::{Result, RoutingError};
use crate::exec::{exec, Params};
use crate::matcher::Matchers;
use crate::pathname::{decode_params, decode_pathname};
use crate::pattern::CompiledRoute;
use crate::sort::{sort_routes, RouteKey};

/// A route in the table.
#[derive(Debug, Clone)]
pub struct Route {
    /// The route id (e.g. "/blog/[slug]")
    pub id: String,

    /// The compiled pattern and parameters
    pub compiled: Arc<CompiledRoute>,

    /// Path to the +page file, if any
    pub page: Option<String>,

    /// Path to the +server file, if any
    pub endpoint: Option<String>,

    /// All layouts from root to this route
    pub layouts: Vec<String>,
}

impl Route {
    fn new(id: impl Into<String>, compiled: Arc<CompiledRoute>) -> Self {
        Self {
            id: id.into(),
            compiled,
            page: None,
            endpoint: None,
            layouts: Vec::new(),
        }
    }

    /// Returns true if this is an endpoint without a page.
    pub fn is_endpoint(&self) -> bool {
        self.endpoint.is_some() && self.page.is_none()
    }

    /// Returns true if this is a page route.
    pub fn is_page(&self) -> bool {
        self.page.is_some()
    }
}

/// Result of matching a path to a route.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,

    /// Decoded parameters
    pub params: Params,
}

impl<'a> RouteMatch<'a> {
    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Priority-ordered route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    cache: RouteCache,
}

impl Router {
    /// Creates an empty router with its own compile cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty router that compiles through a shared cache.
    pub fn with_cache(cache: RouteCache) -> Self {
        Self {
            routes: Vec::new(),
            cache,
        }
    }

    /// Builds a router from route ids.
    ///
    /// # Errors
    ///
    /// Returns the first compilation error.
    pub fn from_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut router = Self::new();
        for id in ids {
            let id = id.as_ref();
            let compiled = router.cache.compile(id)?;
            router.routes.push(Route::new(id, compiled));
        }
        sort_routes(&mut router.routes, |route| route.id.as_str());
        Ok(router)
    }

    /// Builds a router from route file paths relative to the routes root.
    ///
    /// Directories containing a `+page.*` or `+server.*` file become routes;
    /// other files are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use kit_routing::Router;
    ///
    /// let router = Router::from_paths([
    ///     "+layout.svelte",
    ///     "+page.svelte",
    ///     "blog/[slug]/+page.svelte",
    ///     "api/posts/+server.js",
    /// ])
    /// .unwrap();
    ///
    /// let ids: Vec<&str> = router.routes().iter().map(|r| r.id.as_str()).collect();
    /// assert_eq!(ids, vec!["/", "/api/posts", "/blog/[slug]"]);
    /// ```
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new().with_paths(paths)
    }

    /// Adds routes from route file paths, compiling through this router's
    /// cache.
    pub fn with_paths<I, S>(mut self, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pages: HashMap<String, String> = HashMap::new();
        let mut endpoints: HashMap<String, String> = HashMap::new();
        let mut layouts_by_dir: HashMap<String, String> = HashMap::new();

        for path_ref in paths {
            let path = path_ref.as_ref().replace('\\', "/");
            let path_obj = Path::new(&path);

            let file_name = path_obj
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("");

            let parent = path_obj
                .parent()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();

            let stem = file_name.split('.').next().unwrap_or("");
            match stem {
                "+page" => {
                    pages.insert(parent, path.clone());
                }
                "+server" => {
                    endpoints.insert(parent, path.clone());
                }
                "+layout" => {
                    layouts_by_dir.insert(parent, path.clone());
                }
                _ => {}
            }
        }

        let mut dirs: Vec<&String> = pages.keys().chain(endpoints.keys()).collect();
        dirs.sort();
        dirs.dedup();

        for dir in dirs {
            let id = format!("/{}", dir);
            let compiled = self.cache.compile(&id)?;
            let mut route = Route::new(id, compiled);
            route.page = pages.get(dir).cloned();
            route.endpoint = endpoints.get(dir).cloned();
            route.layouts = collect_layouts(dir, &layouts_by_dir);
            self.routes.push(route);
        }

        sort_routes(&mut self.routes, |route| route.id.as_str());
        Ok(self)
    }

    /// Compiles and adds a route id, keeping the table sorted.
    ///
    /// # Errors
    ///
    /// Returns the compilation error for an invalid id.
    pub fn insert(&mut self, id: &str) -> Result<&Route> {
        let compiled = self.cache.compile(id)?;
        let key = RouteKey::new(id);
        let index = self
            .routes
            .iter()
            .position(|existing| key.compare(&RouteKey::new(&existing.id)) == Ordering::Less)
            .unwrap_or(self.routes.len());
        self.routes.insert(index, Route::new(id, compiled));
        Ok(&self.routes[index])
    }

    /// Checks that every matcher referenced by a route is registered.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnknownMatcher`] for the first missing one.
    pub fn validate_matchers(&self, matchers: &Matchers) -> Result<()> {
        for route in &self.routes {
            if let Some(missing) = route.compiled.matcher_names().find(|name| !matchers.contains(name)) {
                return Err(RoutingError::UnknownMatcher {
                    matcher: missing.to_string(),
                    route: route.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Matches a request path to a route.
    ///
    /// Candidates are tried in priority order. A route whose pattern matches
    /// but whose matchers reject the values is skipped in favour of the next
    /// candidate. Returns `None` if no route accepts the path or the path is
    /// malformed.
    pub fn match_url(&self, path: &str, matchers: &Matchers) -> Option<RouteMatch<'_>> {
        let decoded = match decode_pathname(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Could not decode path {}: {}", path, e);
                return None;
            }
        };

        for route in &self.routes {
            let Some(values) = route.compiled.captures(&decoded) else {
                continue;
            };

            let Some(params) = exec(&values, &route.compiled.params, matchers) else {
                tracing::trace!("Route {} rejected {} via matcher", route.id, decoded);
                continue;
            };

            match decode_params(params) {
                Ok(params) => return Some(RouteMatch { route, params }),
                Err(e) => {
                    tracing::warn!("Could not decode params for {}: {}", path, e);
                    return None;
                }
            }
        }

        None
    }

    /// Get all routes in priority order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Get a route by id.
    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// The cache routes are compiled through.
    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }
}

/// Collect all layouts from root to the given directory.
fn collect_layouts(dir: &str, layouts_by_dir: &HashMap<String, String>) -> Vec<String> {
    let mut layouts = Vec::new();
    let mut current = String::new();

    if let Some(root_layout) = layouts_by_dir.get("") {
        layouts.push(root_layout.clone());
    }

    for component in dir.split('/').filter(|c| !c.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(component);

        if let Some(layout) = layouts_by_dir.get(&current) {
            if !layouts.contains(layout) {
                layouts.push(layout.clone());
            }
        }
    }

    layouts
}
