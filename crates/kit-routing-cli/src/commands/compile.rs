// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Compile command for inspecting the patterns generated from route ids.

use anyhow::Context;
use console::style;
use kit_routing::{parse_route_id, CompiledRoute, ParamDescriptor};
use serde_json::json;

/// Compiles each id and prints its pattern and parameters.
pub fn run(ids: &[String], as_json: bool) -> anyhow::Result<()> {
    let routes = compile_all(ids)?;

    if as_json {
        println!("{}", render_json(&routes)?);
        return Ok(());
    }

    for route in &routes {
        println!("{}", style(&route.id).cyan().bold());
        print!("{}", render_text(route));
    }
    Ok(())
}

/// Compiles every id, stopping at the first invalid one.
pub fn compile_all(ids: &[String]) -> anyhow::Result<Vec<CompiledRoute>> {
    ids.iter()
        .map(|id| parse_route_id(id).with_context(|| format!("Failed to compile route {}", id)))
        .collect()
}

/// Renders compiled routes as a JSON array of `{ id, pattern, params }`.
pub fn render_json(routes: &[CompiledRoute]) -> anyhow::Result<String> {
    let value: Vec<_> = routes
        .iter()
        .map(|route| {
            json!({
                "id": route.id,
                "pattern": route.pattern.as_str(),
                "params": route.params,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Renders the pattern and parameter lines for one route.
pub fn render_text(route: &CompiledRoute) -> String {
    let mut out = format!("  pattern: {}\n", route.pattern.as_str());
    if route.params.is_empty() {
        out.push_str("  params:  (none)\n");
    }
    for param in &route.params {
        out.push_str(&format!("  param:   {}\n", describe(param)));
    }
    out
}

fn describe(param: &ParamDescriptor) -> String {
    let mut flags = Vec::new();
    if param.optional {
        flags.push("optional".to_string());
    }
    if param.rest {
        flags.push("rest".to_string());
    }
    if param.chained {
        flags.push("chained".to_string());
    }
    if let Some(matcher) = &param.matcher {
        flags.push(format!("matcher={}", matcher));
    }

    if flags.is_empty() {
        param.name.clone()
    } else {
        format!("{} ({})", param.name, flags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let routes = compile_all(&["/[[lang=locale]]/docs/[...path]".to_string()]).unwrap();
        let expected = [
            "  pattern: ^(?:/([^/]+))?/docs(?:/(.*))?/?$",
            "  param:   lang (optional, chained, matcher=locale)",
            "  param:   path (rest, chained)",
            "",
        ];
        assert_eq!(render_text(&routes[0]), expected.join("\n"));
    }

    #[test]
    fn test_render_static() {
        let routes = compile_all(&["/about".to_string()]).unwrap();
        assert!(render_text(&routes[0]).contains("(none)"));
    }

    #[test]
    fn test_render_json() {
        let routes = compile_all(&["/blog/[slug]".to_string()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&routes).unwrap()).unwrap();
        assert_eq!(value[0]["id"], "/blog/[slug]");
        assert_eq!(value[0]["pattern"], "^/blog/([^/]+?)/?$");
        assert_eq!(value[0]["params"][0]["name"], "slug");
        assert_eq!(value[0]["params"][0]["matcher"], serde_json::Value::Null);
    }

    #[test]
    fn test_invalid_id_reports_route() {
        let err = compile_all(&["/ok".to_string(), "/[b-c]".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Failed to compile route /[b-c]");
    }
}
