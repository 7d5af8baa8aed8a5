//! Fixed-window rate limiting state and decisions.

use serde::{Deserialize, Serialize};

/// Request counter for one caller within one fixed window.
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitWindow {
    /// Requests admitted in the current window.
    pub count: u32,
    /// When the current window opened.
    pub window_start: i64,
    /// When the current window closes.
    pub reset_time: i64,
}

impl RateLimitWindow {
    /// Opens a window at `now` that admits its first request immediately.
    #[must_use]
    pub fn open(now: i64, window_ms: u64) -> Self {
        let window_ms = i64::try_from(window_ms).unwrap_or(i64::MAX);
        Self {
            count: 1,
            window_start: now,
            reset_time: now.saturating_add(window_ms),
        }
    }

    /// A window expires once `now` reaches its reset time.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.reset_time
    }
}

/// Result of asking a rate limiter to admit one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Requests still available in the current window.
    pub remaining_requests: u32,
    /// When the current window closes.
    pub reset_time: i64,
}
