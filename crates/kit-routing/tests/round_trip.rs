// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Property tests: paths built from parameter values match back to the same
//! values.

use kit_routing::{parse_route_id, resolve_route, Matchers, Params, Router};
use proptest::prelude::*;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

proptest! {
    #[test]
    fn test_required_params_round_trip(a in "[a-zA-Z0-9_.~-]{1,12}", b in "[a-zA-Z0-9_.~-]{1,12}") {
        let route = parse_route_id("/[a]/x/[b]").unwrap();
        let path = format!("/{}/x/{}", a, b);
        let matched = route.exec(&path, &Matchers::new()).unwrap();
        prop_assert_eq!(matched, params(&[("a", a.as_str()), ("b", b.as_str())]));
    }

    #[test]
    fn test_resolve_then_exec(
        lang in "[a-z]{2}",
        id in "[a-z0-9]{1,8}",
        segments in prop::collection::vec("[a-z0-9]{1,8}", 0..4),
    ) {
        let route_id = "/(shop)/[[lang]]/items/[id]/[...path]";
        let rest = segments.join("/");
        let expected = params(&[("lang", lang.as_str()), ("id", id.as_str()), ("path", rest.as_str())]);

        let path = resolve_route(route_id, &expected).unwrap();
        let matched = parse_route_id(route_id).unwrap().exec(&path, &Matchers::new()).unwrap();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn test_encoded_values_decode(value in "[^/%]{1,10}") {
        let router = Router::from_ids(["/files/[name]"]).unwrap();
        let path = format!("/files/{}", urlencoding::encode(&value));
        let matched = router.match_url(&path, &Matchers::new()).unwrap();
        prop_assert_eq!(matched.param("name"), Some(value.as_str()));
    }
}
