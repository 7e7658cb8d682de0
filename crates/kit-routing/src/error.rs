// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for route compilation and resolution.
//!
//! A path that fails to match a route is not an error: matching returns
//! `None` so the caller can move on to the next candidate. Everything in
//! [`RoutingError`] is a configuration or input defect.

use thiserror::Error;

/// The main error type for routing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// A placeholder name or matcher name is not a valid identifier.
    #[error("Invalid param: {0}. Params and matcher names can only have underscores and alphanumeric characters.")]
    InvalidParam(String),

    /// The generated expression was rejected by the regex engine.
    #[error("Invalid route pattern for {id}: {message}")]
    InvalidPattern {
        /// The route id being compiled.
        id: String,
        /// Message reported by the regex engine.
        message: String,
    },

    /// A required parameter was not supplied when resolving a route.
    #[error("Missing parameter '{name}' in route {route}")]
    MissingParameter {
        /// Parameter name.
        name: String,
        /// The route id being resolved.
        route: String,
    },

    /// A parameter value would produce an empty path segment.
    #[error("Parameter '{name}' in route {route} cannot start or end with a slash -- this would cause an invalid route like foo//bar")]
    InvalidParameterValue {
        /// Parameter name.
        name: String,
        /// The route id being resolved.
        route: String,
    },

    /// A route refers to a matcher that is not registered.
    #[error("No matcher found for parameter '{matcher}' in route {route}")]
    UnknownMatcher {
        /// The matcher name referenced by the route.
        matcher: String,
        /// The route id.
        route: String,
    },

    /// A matcher definition could not be turned into a predicate.
    #[error("Invalid matcher '{name}': {message}")]
    InvalidMatcher {
        /// The matcher name.
        name: String,
        /// Why the definition was rejected.
        message: String,
    },

    /// The request path contains percent escapes that do not decode to UTF-8.
    #[error("Malformed path: {0}")]
    MalformedPath(String),

    /// Cache operation failed.
    #[error("Cache error: {0}")]
    CacheError(String),
}

/// Convenience type alias for Results with [`RoutingError`].
pub type Result<T> = std::result::Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_message_names_token() {
        let err = RoutingError::InvalidParam("b-c".to_string());
        assert!(err.to_string().starts_with("Invalid param: b-c."));
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = RoutingError::MissingParameter {
            name: "slug".to_string(),
            route: "/blog/[slug]".to_string(),
        };
        assert_eq!(err.to_string(), "Missing parameter 'slug' in route /blog/[slug]");
    }
}
