// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Building concrete paths from route ids.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::{Result, RoutingError};
use crate::exec::Params;
use crate::segment::get_route_segments;

lazy_static! {
    static ref BASIC_PARAM: Regex =
        Regex::new(r"\[(\[)?(\.\.\.)?([a-zA-Z0-9_]+?)(?:=([a-zA-Z0-9_]+))?\]\]?").unwrap();
}

/// Fills in the parameters of a route id, producing a path.
///
/// Missing or empty optional parameters drop out of the path, as does a rest
/// parameter given as the empty string. Route groups are removed.
///
/// # Errors
///
/// - [`RoutingError::MissingParameter`] if a required or rest parameter has
///   no value
/// - [`RoutingError::InvalidParameterValue`] if a value starts or ends with
///   `/`
///
/// # Examples
///
/// ```
/// use kit_routing::{resolve_route, Params};
///
/// let mut params = Params::new();
/// params.insert("slug".to_string(), "hello-world".to_string());
///
/// let path = resolve_route("/(blog)/posts/[slug]/[[page]]", &params).unwrap();
/// assert_eq!(path, "/posts/hello-world");
/// ```
pub fn resolve_route(id: &str, params: &Params) -> Result<String> {
    let mut resolved = Vec::new();

    for segment in get_route_segments(id) {
        let mut out = String::with_capacity(segment.len());
        let mut last = 0;

        for caps in BASIC_PARAM.captures_iter(segment) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            out.push_str(&segment[last..whole.start]);
            out.push_str(&resolve_param(id, &caps, params)?);
            last = whole.end;
        }
        out.push_str(&segment[last..]);

        if !out.is_empty() {
            resolved.push(out);
        }
    }

    Ok(format!("/{}", resolved.join("/")))
}

fn resolve_param(id: &str, caps: &Captures<'_>, params: &Params) -> Result<String> {
    let optional = caps.get(1).is_some();
    let rest = caps.get(2).is_some();
    let name = &caps[3];

    match params.get(name) {
        Some(value) if !value.is_empty() => {
            if value.starts_with('/') || value.ends_with('/') {
                return Err(RoutingError::InvalidParameterValue {
                    name: name.to_string(),
                    route: id.to_string(),
                });
            }
            Ok(value.clone())
        }
        Some(_) if optional || rest => Ok(String::new()),
        None if optional => Ok(String::new()),
        _ => Err(RoutingError::MissingParameter {
            name: name.to_string(),
            route: id.to_string(),
        }),
    }
}
