// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Resolve command for building paths from route ids.

use anyhow::Context;
use kit_routing::{resolve_route, Params};

/// Resolves `id` with `name=value` pairs and prints the path.
pub fn run(id: &str, pairs: &[String]) -> anyhow::Result<()> {
    let params = parse_pairs(pairs)?;
    let path = resolve_route(id, &params).with_context(|| format!("Failed to resolve route {}", id))?;
    println!("{}", path);
    Ok(())
}

/// Parses `name=value` arguments. Later pairs override earlier ones.
pub fn parse_pairs(pairs: &[String]) -> anyhow::Result<Params> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("Expected name=value, got '{}'", pair))?;
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let params = parse_pairs(&["slug=a=b".to_string(), "page=".to_string()]).unwrap();
        assert_eq!(params.get("slug").map(String::as_str), Some("a=b"));
        assert_eq!(params.get("page").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_pairs_rejects_bare_names() {
        let err = parse_pairs(&["slug".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Expected name=value, got 'slug'");
    }
}
