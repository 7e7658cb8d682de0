// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Decoding captured values into route parameters.
//!
//! A structural regex match is not the final word: a chained optional
//! parameter whose matcher rejects its value is treated as absent, and the
//! values after it shift one place to the left. When a chained rest parameter
//! is reached, every value skipped that way is rolled back into it. For
//! `/[[lang=locale]]/[...path]` and `/docs/intro`, `docs` is rejected as a
//! locale and the result is `{ path: "docs/intro" }`.

use std::collections::HashMap;

use crate::matcher::Matchers;
use crate::pattern::ParamDescriptor;

/// Decoded route parameters, keyed by parameter name.
pub type Params = HashMap<String, String>;

/// Decodes the capture `values` of a successful match into parameters.
///
/// `values[i]` is the value of capture group `i + 1`, `None` if the group
/// did not participate. Returns `None` if a matcher rejects a value that
/// cannot be skipped, or if skipped values are left over at the end; the
/// caller should then try the next candidate route.
pub fn exec(values: &[Option<&str>], params: &[ParamDescriptor], matchers: &Matchers) -> Option<Params> {
    let mut result = Params::new();
    let defined = values.iter().filter(|v| v.is_some()).count();

    // Number of chained optional params rejected since the last reset. The
    // value for param `i` is read from `values[i - buffered]`.
    let mut buffered = 0;

    for (i, param) in params.iter().enumerate() {
        let mut value = values.get(i - buffered).copied().flatten().map(str::to_string);

        if param.chained && param.rest && buffered > 0 {
            let end = (i + 1).min(values.len());
            let start = (i - buffered).min(end);
            let joined: Vec<&str> = values[start..end]
                .iter()
                .flatten()
                .copied()
                .filter(|s| !s.is_empty())
                .collect();
            value = Some(joined.join("/"));
            buffered = 0;
        }

        let Some(value) = value else {
            if param.rest {
                result.insert(param.name.clone(), String::new());
            }
            continue;
        };

        let accepted = param
            .matcher
            .as_deref()
            .map_or(true, |matcher| matchers.test(matcher, &value));

        if accepted {
            result.insert(param.name.clone(), value);

            let next_param = params.get(i + 1);
            let next_value = values.get(i + 1).copied().flatten();

            // The next optional value is really there, so nothing before it
            // needs to be rolled forward any more.
            if let Some(next) = next_param {
                if !next.rest && next.optional && next_value.is_some_and(|v| !v.is_empty()) && param.chained {
                    buffered = 0;
                }
            }

            // Every defined value has found a home.
            if next_param.is_none() && next_value.map_or(true, str::is_empty) && result.len() == defined {
                buffered = 0;
            }
            continue;
        }

        if param.optional && param.chained {
            buffered += 1;
            continue;
        }

        tracing::trace!("Matcher rejected '{}' for param {}", value, param.name);
        return None;
    }

    if buffered > 0 {
        return None;
    }

    Some(result)
}
