//! Standard API response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding the generation timestamp of an envelope.
pub const TIMESTAMP_METADATA_KEY: &str = "timestamp";

/// Uniform wrapper around an API payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// True for status codes below 400.
    pub success: bool,
    /// HTTP-style status code.
    pub status_code: u16,
    /// Caller payload, passed through untouched.
    pub data: T,
    /// Caller metadata plus the generated `timestamp` entry.
    pub metadata: Map<String, Value>,
    /// Human readable status phrase.
    pub message: String,
}

/// Returns whether a status code denotes success.
#[must_use]
pub fn is_success_status(status_code: u16) -> bool {
    status_code < 400
}

/// Returns the canonical phrase for well-known status codes.
#[must_use]
pub fn status_message(status_code: u16) -> Option<&'static str> {
    let message = match status_code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    };

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_boundary_is_400() {
        assert!(is_success_status(399));
        assert!(!is_success_status(400));
    }

    #[test]
    fn unknown_codes_have_no_phrase() {
        assert_eq!(status_message(418), None);
        assert_eq!(status_message(429), Some("Too Many Requests"));
    }
}
