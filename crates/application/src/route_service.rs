//! First-match URL routing over an ordered route table.

use std::collections::BTreeMap;

use toolbelt_domain::{RouteDefinition, RouteMatch, RoutePattern};
use tracing::{debug, trace};
use url::form_urlencoded;

/// Matches `path` against `routes` in order and returns the first hit.
///
/// Anything after the first `?` is decoded as a query string and attached to
/// the match; only the part before it is routed.
#[must_use]
pub fn route_matcher(routes: &[RouteDefinition], path: &str) -> Option<RouteMatch> {
    let (pathname, query) = split_path(path);

    let Some((route, params)) = routes
        .iter()
        .find_map(|route| match_route(route, pathname).map(|params| (route, params)))
    else {
        trace!(pathname, routes = routes.len(), "no route matched");
        return None;
    };

    debug!(
        pattern = %route.path,
        kind = route.pattern().kind(),
        pathname,
        "route matched"
    );

    Some(RouteMatch {
        route: route.clone(),
        params,
        query: query.map(parse_query).unwrap_or_default(),
    })
}

/// Splits a path at the first `?` into pathname and raw query string.
#[must_use]
pub fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((pathname, query)) => (pathname, Some(query)),
        None => (path, None),
    }
}

/// Decodes an `application/x-www-form-urlencoded` query string.
///
/// Keys without `=` map to an empty string. When a key repeats, its first
/// value is kept.
#[must_use]
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

fn match_route(route: &RouteDefinition, pathname: &str) -> Option<BTreeMap<String, String>> {
    match route.pattern() {
        RoutePattern::Wildcard(prefix) => pathname.starts_with(prefix).then(BTreeMap::new),
        RoutePattern::Dynamic(pattern) => match_segments(pattern, pathname),
        RoutePattern::Static(pattern) => {
            let matched = if route.requires_exact_match() {
                pathname == pattern
            } else {
                pathname.starts_with(pattern)
            };
            matched.then(BTreeMap::new)
        }
    }
}

fn match_segments(pattern: &str, pathname: &str) -> Option<BTreeMap<String, String>> {
    let expected: Vec<&str> = pattern.split('/').collect();
    let actual: Vec<&str> = pathname.split('/').collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in expected.into_iter().zip(actual) {
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_owned(), actual.to_owned());
        } else if expected != actual {
            return None;
        }
    }

    Some(params)
}
