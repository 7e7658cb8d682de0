// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `compile`: Show the pattern and parameters of route ids
//! - `routes`: List discovered routes in priority order
//! - `match`: Find the route serving a request path
//! - `resolve`: Build a path from a route id and parameters

/// Route id compilation command.
pub mod compile;
/// Path matching command.
pub mod match_path;
/// Path resolution command.
pub mod resolve;
/// Route listing command.
pub mod routes;
