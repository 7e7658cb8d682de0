// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # kit-routing
//!
//! SvelteKit-style filesystem route compiler and matcher.
//!
//! A route id is a directory path under the routes root, such as
//! `/blog/[slug]`, `/[[lang]]/docs/[...path]` or `/(app)/items/[id=integer]`.
//! [`parse_route_id`] compiles it into one anchored regular expression and a
//! list of parameter descriptors; [`exec`] turns the captured values of a
//! match into named parameters, consulting user-supplied matchers.
//!
//! ## Features
//!
//! - Required (`[x]`), optional (`[[x]]`) and rest (`[...x]`) parameters
//! - Parameter matchers (`[x=matcher]`)
//! - Route groups (`(group)`) that do not appear in URLs
//! - `x+HH` / `u+HHHH` escapes for characters not allowed in file names
//! - Route priority sorting and a [`Router`] that falls through on rejection
//! - [`resolve_route`] for building paths from ids
//!
//! ## Quick Start
//!
//! ```rust
//! use kit_routing::{parse_route_id, Matchers};
//!
//! let route = parse_route_id("/[[lang]]/docs/[...path]").unwrap();
//! let matchers = Matchers::new();
//!
//! let params = route.exec("/en/docs/a/b", &matchers).unwrap();
//! assert_eq!(params["lang"], "en");
//! assert_eq!(params["path"], "a/b");
//! ```

/// Error types.
pub mod error;
/// Route id segmentation.
pub mod segment;
/// Route id compilation.
pub mod pattern;
/// Match decoding.
pub mod exec;
/// Parameter matchers.
pub mod matcher;
/// Route priority ordering.
pub mod sort;
/// Path building from route ids.
pub mod resolve;
/// Request path decoding.
pub mod pathname;
/// Compiled route caching.
pub mod cache;
/// Priority-ordered route tables.
pub mod router;

pub use cache::{RouteCache, DEFAULT_CACHE_CAPACITY};
pub use error::{Result, RoutingError};
pub use exec::{exec, Params};
pub use matcher::{Matchers, ParamMatcher, RegexMatcher};
pub use pathname::{decode_params, decode_pathname};
pub use pattern::{parse_route_id, CompiledRoute, ParamDescriptor};
pub use resolve::resolve_route;
pub use router::{Route, RouteMatch, Router};
pub use segment::{affects_path, get_route_segments, split_parts, Part};
pub use sort::{compare_route_ids, sort_routes};
