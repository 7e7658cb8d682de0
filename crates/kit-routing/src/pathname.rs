// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Percent-decoding of request paths and parameter values.
//!
//! Paths are decoded before matching, except for escapes of URI-reserved
//! characters. `/blog/a%2Fb` keeps its `%2F`, so the escaped slash cannot
//! split a segment, and a route like `/[x+2f]` (a literal slash) compiles to
//! a pattern matching `%2F` or `%2f`. Parameter values are fully decoded
//! after matching with [`decode_params`].

use crate::error::{Result, RoutingError};
use crate::exec::Params;

/// Characters whose escapes survive [`decode_pathname`].
const RESERVED: &[u8] = b";/?:@&=+$,#%";

/// Decodes a request path for matching.
///
/// # Errors
///
/// Returns [`RoutingError::MalformedPath`] if a `%` is not followed by two
/// hex digits, or if the decoded bytes are not valid UTF-8.
pub fn decode_pathname(pathname: &str) -> Result<String> {
    if !pathname.contains('%') {
        return Ok(pathname.to_string());
    }

    let bytes = pathname.as_bytes();
    let mut decoded = String::with_capacity(pathname.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        let high = bytes.get(i + 1).copied().and_then(hex_value);
        let low = bytes.get(i + 2).copied().and_then(hex_value);
        let (Some(high), Some(low)) = (high, low) else {
            return Err(RoutingError::MalformedPath(pathname.to_string()));
        };

        if RESERVED.contains(&(high << 4 | low)) {
            decoded.push_str(&decode_run(pathname, &pathname[run_start..i])?);
            decoded.push_str(&pathname[i..i + 3]);
            run_start = i + 3;
        }
        i += 3;
    }

    decoded.push_str(&decode_run(pathname, &pathname[run_start..])?);
    Ok(decoded)
}

/// Fully decodes every parameter value.
///
/// # Errors
///
/// Returns [`RoutingError::MalformedPath`] if a value does not decode to
/// UTF-8.
pub fn decode_params(params: Params) -> Result<Params> {
    params
        .into_iter()
        .map(|(name, value)| {
            let decoded = urlencoding::decode(&value)
                .map_err(|_| RoutingError::MalformedPath(value.clone()))?
                .into_owned();
            Ok((name, decoded))
        })
        .collect()
}

fn decode_run(pathname: &str, run: &str) -> Result<String> {
    urlencoding::decode(run)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RoutingError::MalformedPath(pathname.to_string()))
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
