//! User directory records and search filter criteria.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient::or_default;

/// A user record as supplied by the caller.
///
/// Records are treated as immutable input: searching clones matches out and
/// never rewrites the originals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name, also the sort key.
    pub name: String,
    /// Email address, searched alongside the name.
    pub email: String,
    /// Free-form role label such as `admin` or `user`.
    pub role: String,
    /// Whether the account is active.
    pub active: bool,
    /// Registration date in any date-like string form. Null or non-string
    /// values are kept as an empty, unparsable date.
    #[serde(default, deserialize_with = "or_default")]
    pub registered_at: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        active: bool,
        registered_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            active,
            registered_at: registered_at.into(),
        }
    }

    /// Returns the parsed registration instant, if the stored value is a date.
    #[must_use]
    pub fn registered_instant(&self) -> Option<DateTime<Utc>> {
        parse_calendar_instant(self.registered_at.as_str())
    }
}

/// Optional constraints applied by user search. Absent fields do not constrain,
/// and neither do fields of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    /// Required role, compared exactly.
    #[serde(deserialize_with = "or_default")]
    pub role: Option<String>,
    /// Required active flag.
    #[serde(deserialize_with = "or_default")]
    pub active: Option<bool>,
    /// Users must have registered strictly after this date.
    #[serde(deserialize_with = "or_default")]
    pub registered_after: Option<String>,
}

impl UserFilter {
    /// Restricts results to the given role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Restricts results to the given active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Restricts results to users registered strictly after the given date.
    #[must_use]
    pub fn with_registered_after(mut self, registered_after: impl Into<String>) -> Self {
        self.registered_after = Some(registered_after.into());
        self
    }
}

/// Parses a date-like string into a UTC instant.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` date-times
/// (read as UTC) and bare `YYYY-MM-DD` dates (midnight UTC). Anything else
/// yields `None`.
#[must_use]
pub fn parse_calendar_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
