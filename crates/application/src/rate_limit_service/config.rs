use serde::{Deserialize, Serialize};

use toolbelt_core::{AppError, AppResult};

/// Configuration for a fixed-window rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRule {
    /// Window length in milliseconds.
    pub window_ms: u64,
    /// Maximum requests admitted per caller per window.
    pub max_requests: u32,
}

impl RateLimitRule {
    /// Creates a new rate limit rule.
    #[must_use]
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }

    /// Rejects rules that could never admit a request.
    pub fn validate(&self) -> AppResult<()> {
        if self.window_ms == 0 {
            return Err(AppError::Validation(
                "rate limit window must be greater than zero".to_owned(),
            ));
        }

        if self.max_requests == 0 {
            return Err(AppError::Validation(
                "rate limit max requests must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}
