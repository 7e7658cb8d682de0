// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Splitting route ids into segments and segments into parts.
//!
//! A route id is the directory path of a route relative to the routes root,
//! e.g. `/blog/[slug]` or `/(marketing)/about`. Each `/`-separated segment is
//! either plain text or a mix of text and `[...]` placeholders:
//!
//! - `blog` → one static part
//! - `[slug].json` → `""`, `slug`, `.json`
//! - `sub[[param]]` → `sub`, `[param]`, `""`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ROUTE_GROUP: Regex = Regex::new(r"^\([^)]+\)$").unwrap();
}

/// A piece of a route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    /// Literal text, possibly empty.
    Static(&'a str),
    /// The text between the outer brackets of a placeholder, e.g. `slug`,
    /// `[slug]`, `...rest` or `id=uuid`.
    Dynamic(&'a str),
}

impl<'a> Part<'a> {
    /// Returns the raw text of the part.
    pub fn content(&self) -> &'a str {
        match self {
            Part::Static(s) | Part::Dynamic(s) => s,
        }
    }
}

/// Returns false for route group segments like `(marketing)`, which organise
/// routes on disk without appearing in the URL.
pub fn affects_path(segment: &str) -> bool {
    !ROUTE_GROUP.is_match(segment)
}

/// Splits a route id into the segments that take part in URL matching.
///
/// The leading `/` is removed and route groups are dropped. Empty segments
/// are kept; the root id `/` yields a single empty segment.
pub fn get_route_segments(id: &str) -> Vec<&str> {
    id.strip_prefix('/')
        .unwrap_or(id)
        .split('/')
        .filter(|segment| affects_path(segment))
        .collect()
}

/// Splits a segment into alternating static and dynamic parts.
///
/// The result always starts and ends with a [`Part::Static`] (possibly empty)
/// and dynamic parts sit at odd indices. A placeholder runs from `[` to the
/// first `]` that is not itself followed by `]`, so `[[slug]]` yields the
/// dynamic part `[slug]`.
pub fn split_parts(segment: &str) -> Vec<Part<'_>> {
    let bytes = segment.as_bytes();
    let mut parts = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'[' {
            if let Some(close) = find_close(bytes, i + 1) {
                parts.push(Part::Static(&segment[last..i]));
                parts.push(Part::Dynamic(&segment[i + 1..close]));
                last = close + 1;
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }

    parts.push(Part::Static(&segment[last..]));
    parts
}

/// Finds the closing bracket for a placeholder whose content starts at
/// `start`. The content must be at least one byte long.
fn find_close(bytes: &[u8], start: usize) -> Option<usize> {
    (start + 1..bytes.len()).find(|&j| bytes[j] == b']' && bytes.get(j + 1) != Some(&b']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_groups_do_not_affect_path() {
        assert!(!affects_path("(marketing)"));
        assert!(affects_path("()"));
        assert!(affects_path("blog"));
        assert!(affects_path("[slug]"));
    }

    #[test]
    fn test_get_route_segments() {
        assert_eq!(get_route_segments("/"), vec![""]);
        assert_eq!(get_route_segments("/blog/[slug]"), vec!["blog", "[slug]"]);
        assert_eq!(
            get_route_segments("/(app)/settings/(tabs)/[[tab]]"),
            vec!["settings", "[[tab]]"]
        );
    }

    #[test]
    fn test_split_static_segment() {
        assert_eq!(split_parts("blog"), vec![Part::Static("blog")]);
        assert_eq!(split_parts(""), vec![Part::Static("")]);
    }

    #[test]
    fn test_split_placeholders() {
        assert_eq!(
            split_parts("[slug].json"),
            vec![Part::Static(""), Part::Dynamic("slug"), Part::Static(".json")]
        );
        assert_eq!(
            split_parts("sub[[param]]"),
            vec![Part::Static("sub"), Part::Dynamic("[param]"), Part::Static("")]
        );
        assert_eq!(
            split_parts("[a]-[b=num]"),
            vec![
                Part::Static(""),
                Part::Dynamic("a"),
                Part::Static("-"),
                Part::Dynamic("b=num"),
                Part::Static(""),
            ]
        );
    }

    #[test]
    fn test_split_unclosed_bracket_is_static() {
        assert_eq!(split_parts("a[b"), vec![Part::Static("a[b")]);
        assert_eq!(split_parts("[]"), vec![Part::Static("[]")]);
    }
}
