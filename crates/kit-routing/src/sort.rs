// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route priority.
//!
//! Several routes can match the same path, e.g. `/blog/about` and
//! `/blog/[slug]`. Routes are tried in the order produced here, the most
//! specific first:
//!
//! - a route that ends earlier outranks a deeper one at the same position
//! - static text outranks parameters
//! - a parameter with a matcher outranks one without
//! - a required parameter outranks an optional one
//! - a rest parameter comes last, unless static text follows it and the
//!   other route has none
//!
//! Optional segments that are not at the end of the id are ignored, since
//! they may not be present in the path at all.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use crate::segment::{get_route_segments, split_parts, Part};

lazy_static! {
    static ref OPTIONAL_SEGMENT: Regex = Regex::new(r"\[\[[^\]]+\]\]").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartKind {
    Static,
    Required,
    Optional,
    Rest,
}

#[derive(Debug, Clone)]
struct SortPart {
    kind: PartKind,
    content: String,
    matched: bool,
}

impl SortPart {
    fn empty() -> Self {
        Self {
            kind: PartKind::Static,
            content: String::new(),
            matched: false,
        }
    }

    fn from_part(part: Part<'_>) -> Self {
        match part {
            Part::Static(text) => Self {
                kind: PartKind::Static,
                content: text.to_string(),
                matched: false,
            },
            Part::Dynamic(content) => {
                let kind = if content.starts_with('[') {
                    PartKind::Optional
                } else if content.starts_with("...") {
                    PartKind::Rest
                } else {
                    PartKind::Required
                };
                Self {
                    kind,
                    content: content.to_string(),
                    matched: content.contains('='),
                }
            }
        }
    }
}

fn split_route_id(id: &str) -> Vec<Vec<SortPart>> {
    let mut stripped = String::with_capacity(id.len());
    let mut last = 0;
    for m in OPTIONAL_SEGMENT.find_iter(id) {
        stripped.push_str(&id[last..m.start()]);
        if m.end() == id.len() {
            stripped.push_str(m.as_str());
        }
        last = m.end();
    }
    stripped.push_str(&id[last..]);

    get_route_segments(&stripped)
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| split_parts(segment).into_iter().map(SortPart::from_part).collect())
        .collect()
}

/// Whether static text follows the dynamic part at `segments[i][j]`, either
/// in the same segment or at the start of the next one.
fn has_static_after(segments: &[Vec<SortPart>], i: usize, j: usize) -> bool {
    let in_segment = segments[i].get(j + 1).is_some_and(|p| !p.content.is_empty());
    let in_next = segments
        .get(i + 1)
        .and_then(|segment| segment.first())
        .is_some_and(|p| !p.content.is_empty());
    in_segment || in_next
}

/// Compares static text character by character. A string that is a prefix
/// of the other sorts after it.
fn sort_static(a: &str, b: &str) -> Ordering {
    let mut chars_a = a.chars();
    let mut chars_b = b.chars();
    loop {
        match (chars_a.next(), chars_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) if x != y => return x.cmp(&y),
            _ => {}
        }
    }
}

/// A route id split once into the parts the priority rules look at.
pub(crate) struct RouteKey<'a> {
    id: &'a str,
    segments: Vec<Vec<SortPart>>,
}

impl<'a> RouteKey<'a> {
    pub(crate) fn new(id: &'a str) -> Self {
        Self {
            id,
            segments: split_route_id(id),
        }
    }

    /// `Less` means `self` is tried first.
    pub(crate) fn compare(&self, other: &RouteKey<'_>) -> Ordering {
        compare_segments(self.id, &self.segments, other.id, &other.segments)
    }
}

/// Compares two route ids by priority. `Less` means `a` is tried first.
pub fn compare_route_ids(a: &str, b: &str) -> Ordering {
    RouteKey::new(a).compare(&RouteKey::new(b))
}

fn compare_segments(a: &str, segments_a: &[Vec<SortPart>], b: &str, segments_b: &[Vec<SortPart>]) -> Ordering {
    let empty = vec![SortPart::empty()];

    for i in 0..segments_a.len().max(segments_b.len()) {
        let missing_a = i >= segments_a.len();
        let missing_b = i >= segments_b.len();
        let segment_a = segments_a.get(i).unwrap_or(&empty);
        let segment_b = segments_b.get(i).unwrap_or(&empty);

        for j in 0..segment_a.len().max(segment_b.len()) {
            let part_a = segment_a.get(j);
            let part_b = segment_b.get(j);

            if j % 2 == 1 {
                let Some(part_a) = part_a else {
                    return Ordering::Less;
                };
                let Some(part_b) = part_b else {
                    return Ordering::Greater;
                };

                let next_a = has_static_after(segments_a, i, j);
                let next_b = has_static_after(segments_b, i, j);

                if part_a.kind == PartKind::Rest && part_b.kind == PartKind::Rest {
                    if next_a && next_b {
                        continue;
                    }
                    if next_a {
                        return Ordering::Less;
                    }
                    if next_b {
                        return Ordering::Greater;
                    }
                }

                // `[...rest]/x` outranks `[required]` but not `[required]/x`
                if part_a.kind == PartKind::Rest {
                    return if next_a && !next_b { Ordering::Less } else { Ordering::Greater };
                }
                if part_b.kind == PartKind::Rest {
                    return if next_b && !next_a { Ordering::Greater } else { Ordering::Less };
                }

                if part_a.matched != part_b.matched {
                    return if part_a.matched { Ordering::Less } else { Ordering::Greater };
                }

                if part_a.kind != part_b.kind {
                    if part_a.kind == PartKind::Required {
                        return Ordering::Less;
                    }
                    if part_b.kind == PartKind::Required {
                        return Ordering::Greater;
                    }
                }
            } else if let (Some(part_a), Some(part_b)) = (part_a, part_b) {
                if part_a.content != part_b.content {
                    if missing_a {
                        return Ordering::Less;
                    }
                    if missing_b {
                        return Ordering::Greater;
                    }
                    return sort_static(&part_a.content, &part_b.content);
                }
            }
        }
    }

    b.cmp(a)
}

/// Sorts routes into dispatch order.
///
/// Each id is split once up front. The comparison is not a strict total
/// order for every combination of rest parameters, so this is a stable merge
/// sort rather than `sort_by`, which may panic on an inconsistent order.
pub fn sort_routes<T, F>(routes: &mut Vec<T>, id_of: F)
where
    F: Fn(&T) -> &str,
{
    if routes.len() < 2 {
        return;
    }

    let mut order: Vec<usize> = (0..routes.len()).collect();
    {
        let keys: Vec<RouteKey<'_>> = routes.iter().map(|route| RouteKey::new(id_of(route))).collect();
        merge_sort(&mut order, &|a, b| keys[a].compare(&keys[b]));
    }

    let mut slots: Vec<Option<T>> = std::mem::take(routes).into_iter().map(Some).collect();
    routes.extend(order.into_iter().filter_map(|index| slots[index].take()));
}

/// Stable merge sort of indices. Takes from the right run only when it is
/// strictly less.
fn merge_sort<C>(items: &mut [usize], cmp: &C)
where
    C: Fn(usize, usize) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], cmp);
    merge_sort(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, mid);
    while i < mid && j < items.len() {
        if cmp(items[j], items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(ids: &[&str]) -> Vec<String> {
        let mut routes: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        sort_routes(&mut routes, |id| id.as_str());
        routes
    }

    #[test]
    fn test_static_before_dynamic_before_rest() {
        assert_eq!(
            sorted(&["/[...rest]", "/blog/[slug]", "/blog", "/", "/about"]),
            vec!["/", "/about", "/blog", "/blog/[slug]", "/[...rest]"]
        );
    }

    #[test]
    fn test_matcher_and_optional_priority() {
        assert_eq!(
            sorted(&["/[slug]", "/[[lang]]", "/[id=integer]"]),
            vec!["/[id=integer]", "/[slug]", "/[[lang]]"]
        );
    }

    #[test]
    fn test_rest_followed_by_static_wins() {
        assert_eq!(compare_route_ids("/[...a]/x", "/[...b]"), Ordering::Less);
        assert_eq!(compare_route_ids("/[...b]", "/[...a]/x"), Ordering::Greater);
    }

    #[test]
    fn test_leading_optional_is_ignored() {
        assert_eq!(
            sorted(&["/[[lang]]/about", "/about", "/[slug]"]),
            vec!["/about", "/[[lang]]/about", "/[slug]"]
        );
    }

    #[test]
    fn test_prefix_sorts_after_longer_text() {
        assert_eq!(sort_static("foo", "foobar"), Ordering::Greater);
        assert_eq!(sort_static("bar", "foo"), Ordering::Less);
        assert_eq!(sort_static("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_handles_many_routes() {
        let mut ids: Vec<String> = Vec::new();
        for i in (0..100).rev() {
            ids.push(format!("/s{}/[...rest]", i));
            ids.push(format!("/s{}/[slug]", i));
            ids.push(format!("/s{}/new", i));
        }
        sort_routes(&mut ids, |id| id.as_str());

        assert_eq!(ids.len(), 300);
        for i in 0..100 {
            let position = |id: String| ids.iter().position(|x| *x == id).unwrap();
            let fixed = position(format!("/s{}/new", i));
            let slug = position(format!("/s{}/[slug]", i));
            let rest = position(format!("/s{}/[...rest]", i));
            assert!(fixed < slug && slug < rest, "s{}", i);
        }
    }

    #[test]
    fn test_sort_is_stable_for_identical_ids() {
        let mut routes = vec![("/a", 1), ("/a", 2)];
        sort_routes(&mut routes, |(id, _)| *id);
        assert_eq!(routes, vec![("/a", 1), ("/a", 2)]);
    }
}
