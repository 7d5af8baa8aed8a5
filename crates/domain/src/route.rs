//! Route definitions and match results.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A route pattern with caller-defined attributes.
///
/// `path` forms:
/// - `/docs/*` wildcard, prefix match on everything before `/*`
/// - `/users/:id` dynamic, `:name` segments capture parameters
/// - `/users` static, exact or prefix match depending on `exact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Pattern string.
    pub path: String,
    /// Exact-match marker. Any present value other than `false` (including
    /// `null`, `0` and `""`) requires an exact match for static patterns.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub exact: Option<Value>,
    /// Remaining fields, opaque to matching.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteDefinition {
    /// Creates a route for the given pattern with no `exact` marker.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exact: None,
            extra: Map::new(),
        }
    }

    /// Sets the `exact` marker to an arbitrary value.
    #[must_use]
    pub fn with_exact(mut self, exact: impl Into<Value>) -> Self {
        self.exact = Some(exact.into());
        self
    }

    /// Attaches an opaque attribute, such as a component name.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether a static pattern must equal the path rather than prefix it.
    #[must_use]
    pub fn requires_exact_match(&self) -> bool {
        !matches!(self.exact, None | Some(Value::Bool(false)))
    }

    /// Classifies the pattern. Wildcards win over dynamic segments.
    #[must_use]
    pub fn pattern(&self) -> RoutePattern<'_> {
        let path = self.path.as_str();
        if let Some(prefix) = path.strip_suffix("/*") {
            RoutePattern::Wildcard(prefix)
        } else if path.contains(':') {
            RoutePattern::Dynamic(path)
        } else {
            RoutePattern::Static(path)
        }
    }
}

/// Matching strategy derived from a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern<'a> {
    /// Prefix match on the pattern without its trailing `/*`.
    Wildcard(&'a str),
    /// Segment-by-segment match with `:name` captures.
    Dynamic(&'a str),
    /// Literal pattern.
    Static(&'a str),
}

impl RoutePattern<'_> {
    /// Returns a stable label for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Wildcard(_) => "wildcard",
            Self::Dynamic(_) => "dynamic",
            Self::Static(_) => "static",
        }
    }
}

/// A successful route match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMatch {
    /// The first route that matched.
    pub route: RouteDefinition,
    /// Captured `:name` parameters.
    pub params: BTreeMap<String, String>,
    /// Decoded query string parameters.
    pub query: BTreeMap<String, String>,
}

/// Keeps an explicit `null` as `Some(Value::Null)` so presence is observable.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
