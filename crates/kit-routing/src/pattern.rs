// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route id compilation.
//!
//! [`parse_route_id`] turns a route id into one anchored regular expression
//! and the list of [`ParamDescriptor`]s describing its capture groups, in
//! group order:
//!
//! | route id | pattern |
//! |---|---|
//! | `/blog/[slug]` | `^/blog/([^/]+?)/?$` |
//! | `/blog/[[slug]]` | `^/blog(?:/([^/]+))?/?$` |
//! | `/[...rest]` | `^(?:/(.*))?/?$` |
//! | `/blog/[slug].json` | `^/blog/([^/]+?)\.json/?$` |
//!
//! Whole-segment optional and rest parameters carry their leading slash
//! inside the optional group so the segment can disappear entirely.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, RoutingError};
use crate::exec::{exec, Params};
use crate::matcher::Matchers;
use crate::segment::{get_route_segments, split_parts, Part};

lazy_static! {
    static ref PARAM_PATTERN: Regex = Regex::new(
        r"^(\[)?(\.\.\.)?([a-zA-Z_][a-zA-Z0-9_]*)(?:=([a-zA-Z_][a-zA-Z0-9_]*))?(\])?$"
    )
    .unwrap();
    static ref REST_SEGMENT: Regex = Regex::new(
        r"^\[\.\.\.([a-zA-Z_][a-zA-Z0-9_]*)(?:=([a-zA-Z_][a-zA-Z0-9_]*))?\]$"
    )
    .unwrap();
    static ref OPTIONAL_SEGMENT: Regex = Regex::new(
        r"^\[\[([a-zA-Z_][a-zA-Z0-9_]*)(?:=([a-zA-Z_][a-zA-Z0-9_]*))?\]\]$"
    )
    .unwrap();
}

/// Describes one capture group of a compiled route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    /// Key under which the decoded value is stored.
    pub name: String,
    /// Name of the matcher the value must satisfy, if any.
    pub matcher: Option<String>,
    /// `[[name]]`: the value may be absent.
    pub optional: bool,
    /// `[...name]`: the value may span several segments.
    pub rest: bool,
    /// The parameter owns its leading slash, so the whole segment can
    /// vanish and a rejected value may be rolled into a following rest
    /// parameter.
    pub chained: bool,
}

impl ParamDescriptor {
    fn new(name: &str, matcher: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            matcher: matcher.map(str::to_string),
            optional: false,
            rest: false,
            chained: false,
        }
    }
}

/// A compiled route: the pattern and the parameters it captures.
///
/// Compilation is a pure function of the id, so compiled routes are safe to
/// share between threads and to cache for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// The route id this was compiled from.
    pub id: String,
    /// Anchored pattern matching request paths.
    pub pattern: Regex,
    /// One descriptor per capture group, in group order.
    pub params: Vec<ParamDescriptor>,
}

impl CompiledRoute {
    /// Matches `path` against the pattern and returns the value of every
    /// capture group, `None` for groups that did not participate.
    ///
    /// An inline optional placeholder that matched the empty string counts
    /// as not participating.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<Option<&'p str>>> {
        let caps = self.pattern.captures(path)?;
        let values = self
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                caps.get(i + 1)
                    .map(|m| m.as_str())
                    .filter(|value| param.rest || !value.is_empty())
            })
            .collect();
        Some(values)
    }

    /// Matches `path` and decodes its parameters in one step.
    ///
    /// Returns `None` if the path does not match structurally or a matcher
    /// rejects one of the values.
    pub fn exec(&self, path: &str, matchers: &Matchers) -> Option<Params> {
        let values = self.captures(path)?;
        exec(&values, &self.params, matchers)
    }

    /// Names of all matchers referenced by this route.
    pub fn matcher_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter_map(|p| p.matcher.as_deref())
    }
}

/// Compiles a route id into a [`CompiledRoute`].
///
/// # Errors
///
/// Returns [`RoutingError::InvalidParam`] if a placeholder is not of the form
/// `name`, `[name]`, `...name`, optionally followed by `=matcher`, where both
/// names are identifiers. The error carries the raw placeholder text.
///
/// # Examples
///
/// ```
/// use kit_routing::parse_route_id;
///
/// let route = parse_route_id("/blog/[slug]").unwrap();
/// assert_eq!(route.pattern.as_str(), "^/blog/([^/]+?)/?$");
/// assert_eq!(route.params[0].name, "slug");
/// ```
pub fn parse_route_id(id: &str) -> Result<CompiledRoute> {
    let mut params = Vec::new();

    let source = if id == "/" {
        "^/$".to_string()
    } else {
        let mut source = String::from("^");
        for segment in get_route_segments(id) {
            source.push_str(&compile_segment(segment, &mut params)?);
        }
        source.push_str("/?$");
        source
    };

    let pattern = Regex::new(&source).map_err(|e| RoutingError::InvalidPattern {
        id: id.to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!("Compiled route {} to {}", id, source);

    Ok(CompiledRoute {
        id: id.to_string(),
        pattern,
        params,
    })
}

fn compile_segment(segment: &str, params: &mut Vec<ParamDescriptor>) -> Result<String> {
    // A whole-segment rest parameter may match zero segments.
    if let Some(caps) = REST_SEGMENT.captures(segment) {
        let mut param = ParamDescriptor::new(&caps[1], caps.get(2).map(|m| m.as_str()));
        param.rest = true;
        param.chained = true;
        params.push(param);
        return Ok("(?:/(.*))?".to_string());
    }

    if let Some(caps) = OPTIONAL_SEGMENT.captures(segment) {
        let mut param = ParamDescriptor::new(&caps[1], caps.get(2).map(|m| m.as_str()));
        param.optional = true;
        param.chained = true;
        params.push(param);
        return Ok("(?:/([^/]+))?".to_string());
    }

    if segment.is_empty() {
        return Ok(String::new());
    }

    let parts = split_parts(segment);
    let leading_placeholder = parts.first() == Some(&Part::Static(""));
    let mut source = String::from("/");

    // UTF-16 code units of adjacent escape placeholders, decoded together so
    // a surrogate pair may be split across `[u+d83e][u+dd2a]`.
    let mut pending: Vec<u16> = Vec::new();
    let mut pending_token = "";

    for (i, part) in parts.iter().enumerate() {
        if let Part::Dynamic(content) = *part {
            if let Some(units) = escape_placeholder_units(content)? {
                if pending.is_empty() {
                    pending_token = content;
                }
                pending.extend(units);
                continue;
            }
        }

        if *part == Part::Static("") {
            continue;
        }

        flush_literal(&mut source, &mut pending, pending_token)?;

        match *part {
            Part::Static(text) => source.push_str(&escape(text)),
            Part::Dynamic(content) => {
                let caps = PARAM_PATTERN
                    .captures(content)
                    .ok_or_else(|| RoutingError::InvalidParam(content.to_string()))?;

                let mut param = ParamDescriptor::new(&caps[3], caps.get(4).map(|m| m.as_str()));
                param.optional = caps.get(1).is_some();
                param.rest = caps.get(2).is_some();
                param.chained = param.rest && i == 1 && leading_placeholder;

                source.push_str(if param.rest {
                    "(.*?)"
                } else if param.optional {
                    "([^/]*)?"
                } else {
                    "([^/]+?)"
                });
                params.push(param);
            }
        }
    }

    flush_literal(&mut source, &mut pending, pending_token)?;
    Ok(source)
}

/// Decodes buffered escape code units into escaped literal text.
fn flush_literal(source: &mut String, pending: &mut Vec<u16>, token: &str) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }

    let literal = char::decode_utf16(pending.drain(..))
        .collect::<std::result::Result<String, _>>()
        .map_err(|_| RoutingError::InvalidParam(token.to_string()))?;
    source.push_str(&escape(&literal));
    Ok(())
}

/// Decodes `x+HH` and `u+HHHH-HHHH` placeholders, which stand for characters
/// that cannot appear in a file name, into UTF-16 code units. Returns `None`
/// for ordinary placeholders.
fn escape_placeholder_units(content: &str) -> Result<Option<Vec<u16>>> {
    let invalid = || RoutingError::InvalidParam(content.to_string());

    let codes = if let Some(hex) = content.strip_prefix("x+") {
        hex
    } else if let Some(codes) = content.strip_prefix("u+") {
        codes
    } else {
        return Ok(None);
    };

    codes
        .split('-')
        .map(|code| u16::from_str_radix(code, 16).map_err(|_| invalid()))
        .collect::<Result<Vec<u16>>>()
        .map(Some)
}

/// Escapes literal segment text for use in a pattern.
///
/// The text is NFC-normalised first, since file systems may report names in
/// decomposed form. `%`, `/`, `?` and `#` are matched in their
/// percent-encoded form because pathname decoding leaves those escapes
/// untouched.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfc() {
        match ch {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2[Ff]"),
            '?' => out.push_str("%3[Ff]"),
            '#' => out.push_str("%23"),
            '[' | ']' | '.' | '*' | '+' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(escape("blog.json"), r"blog\.json");
        assert_eq!(escape("a+b(c)"), r"a\+b\(c\)");
        assert_eq!(escape("50%"), "50%25");
        assert_eq!(escape("a?b#c"), "a%3[Ff]b%23c");
        assert_eq!(escape("@-symbol"), "@-symbol");
    }

    #[test]
    fn test_hex_escape_placeholder() {
        let route = parse_route_id("/[x+3f]").unwrap();
        assert_eq!(route.pattern.as_str(), "^/%3[Ff]/?$");
        assert!(route.params.is_empty());
        assert!(route.pattern.is_match("/%3f"));
    }

    #[test]
    fn test_unicode_escape_placeholder() {
        let route = parse_route_id("/[u+0061-0062]c").unwrap();
        assert_eq!(route.pattern.as_str(), "^/abc/?$");
    }

    #[test]
    fn test_bad_escape_placeholder() {
        assert_eq!(
            parse_route_id("/[x+zz]").unwrap_err(),
            RoutingError::InvalidParam("x+zz".to_string())
        );
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let combined = parse_route_id("/[u+d83e-dd2a]").unwrap();
        assert_eq!(combined.pattern.as_str(), "^/\u{1F92A}/?$");

        let split = parse_route_id("/[u+d83e][u+dd2a]").unwrap();
        assert_eq!(split.pattern.as_str(), "^/\u{1F92A}/?$");
        assert!(split.pattern.is_match("/\u{1F92A}"));
    }

    #[test]
    fn test_lone_surrogate_escape() {
        assert_eq!(
            parse_route_id("/[u+d83e]x").unwrap_err(),
            RoutingError::InvalidParam("u+d83e".to_string())
        );
        assert_eq!(
            parse_route_id("/[u+dd2a-d83e]").unwrap_err(),
            RoutingError::InvalidParam("u+dd2a-d83e".to_string())
        );
    }

    #[test]
    fn test_literal_text_is_nfc_normalised() {
        let route = parse_route_id("/cafe\u{301}").unwrap();
        assert_eq!(route.pattern.as_str(), "^/caf\u{e9}/?$");
        assert!(route.pattern.is_match("/caf\u{e9}"));
    }

    #[test]
    fn test_name_cannot_start_with_digit() {
        assert!(parse_route_id("/[1abc]").is_err());
        assert!(parse_route_id("/[abc=1num]").is_err());
        assert!(parse_route_id("/[_abc1=num_2]").is_ok());
    }

    #[test]
    fn test_route_groups_are_ignored() {
        let route = parse_route_id("/(app)/settings/[tab]").unwrap();
        assert_eq!(route.pattern.as_str(), "^/settings/([^/]+?)/?$");
    }

    #[test]
    fn test_empty_inline_optional_is_absent() {
        let route = parse_route_id("/blog/[[slug]].json").unwrap();
        assert_eq!(route.captures("/blog/.json"), Some(vec![None]));
        assert_eq!(route.captures("/blog/a.json"), Some(vec![Some("a")]));
    }

    #[test]
    fn test_empty_rest_is_present() {
        let route = parse_route_id("/[...rest]").unwrap();
        assert_eq!(route.captures("/"), Some(vec![Some("")]));
        assert_eq!(route.captures(""), Some(vec![None]));
    }

    #[test]
    fn test_matcher_names() {
        let route = parse_route_id("/[a=x]/[b]/[[c=y]]").unwrap();
        assert_eq!(route.matcher_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
