// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! kit-routing CLI library.
//!
//! This crate provides the command-line interface for inspecting the routes
//! of a SvelteKit-style project.
//!
//! # Usage
//!
//! This crate is primarily used through the `kit-routing` binary:
//!
//! ```bash
//! kit-routing compile /blog/[slug]      # Show the compiled pattern
//! kit-routing routes                    # List routes in priority order
//! kit-routing match /blog/hello         # Find the route serving a path
//! kit-routing resolve /blog/[slug] slug=hello
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `kit-routing.toml` at the project root.

/// CLI commands (compile, routes, match, resolve).
pub mod commands;
/// Project configuration from `kit-routing.toml`.
pub mod config;
/// Route file discovery on disk.
pub mod discover;
