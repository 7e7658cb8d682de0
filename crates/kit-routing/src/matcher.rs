// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Parameter matchers.
//!
//! A route parameter written as `[id=integer]` only matches when the
//! `integer` matcher accepts the captured value. Matchers are registered by
//! name in a [`Matchers`] registry that is handed to the decoder.
//!
//! # Examples
//!
//! ```
//! use kit_routing::{Matchers, RegexMatcher};
//!
//! let matchers = Matchers::new()
//!     .with("integer", RegexMatcher::new("integer", r"^\d+$").unwrap())
//!     .with("lowercase", |param: &str| param.chars().all(|c| c.is_ascii_lowercase()));
//!
//! assert!(matchers.test("integer", "42"));
//! assert!(!matchers.test("lowercase", "Hello"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, RoutingError};

/// A predicate deciding whether a captured value is acceptable for a
/// parameter.
pub trait ParamMatcher: Send + Sync {
    /// Returns true if `param` is a valid value.
    fn matches(&self, param: &str) -> bool;
}

impl<F> ParamMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, param: &str) -> bool {
        self(param)
    }
}

/// A matcher backed by a regular expression.
///
/// Used for matchers declared in configuration files, where a closure
/// cannot be written.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compiles `pattern` into a matcher registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidMatcher`] if the pattern is not a valid
    /// regular expression.
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RoutingError::InvalidMatcher {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl ParamMatcher for RegexMatcher {
    fn matches(&self, param: &str) -> bool {
        self.regex.is_match(param)
    }
}

/// A registry of named matchers.
///
/// Cloning is cheap; matchers are shared.
#[derive(Clone, Default)]
pub struct Matchers {
    matchers: HashMap<String, Arc<dyn ParamMatcher>>,
}

impl Matchers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a matcher, returning the registry for chaining.
    pub fn with(mut self, name: impl Into<String>, matcher: impl ParamMatcher + 'static) -> Self {
        self.insert(name, matcher);
        self
    }

    /// Registers a matcher, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, matcher: impl ParamMatcher + 'static) {
        self.matchers.insert(name.into(), Arc::new(matcher));
    }

    /// Looks up a matcher by name.
    pub fn get(&self, name: &str) -> Option<&dyn ParamMatcher> {
        self.matchers.get(name).map(|m| m.as_ref())
    }

    /// Returns true if a matcher with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    /// Names of all registered matchers.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matchers.keys().map(String::as_str)
    }

    /// Number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if no matchers are registered.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Runs the named matcher against `param`.
    ///
    /// An unregistered matcher rejects every value.
    pub fn test(&self, name: &str, param: &str) -> bool {
        match self.matchers.get(name) {
            Some(matcher) => matcher.matches(param),
            None => {
                tracing::warn!("No matcher registered for '{}'", name);
                false
            }
        }
    }
}

impl fmt::Debug for Matchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Matchers").field("names", &names).finish()
    }
}
