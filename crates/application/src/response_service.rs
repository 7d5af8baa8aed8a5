//! API response envelope construction.

use std::sync::Arc;

use chrono::SecondsFormat;
use serde_json::{Map, Value};
use toolbelt_domain::{ApiEnvelope, TIMESTAMP_METADATA_KEY, is_success_status, status_message};

use crate::{Clock, SystemClock};

/// Builds [`ApiEnvelope`] values stamped with the current time.
#[derive(Clone)]
pub struct ApiResponseFormatter {
    clock: Arc<dyn Clock>,
}

impl ApiResponseFormatter {
    /// Creates a formatter reading time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Wraps `data` in an envelope.
    ///
    /// The generated `timestamp` metadata entry always replaces a
    /// caller-supplied one.
    pub fn format<T>(
        &self,
        data: T,
        status_code: u16,
        metadata: Option<Map<String, Value>>,
    ) -> ApiEnvelope<T> {
        let success = is_success_status(status_code);
        let message = status_message(status_code)
            .unwrap_or(if success { "Success" } else { "Error" })
            .to_owned();

        let mut metadata = metadata.unwrap_or_default();
        metadata.insert(
            TIMESTAMP_METADATA_KEY.to_owned(),
            Value::String(
                self.clock
                    .now()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );

        ApiEnvelope {
            success,
            status_code,
            data,
            metadata,
            message,
        }
    }
}

impl Default for ApiResponseFormatter {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Wraps `data` in an envelope stamped with the system time.
pub fn format_api_response<T>(
    data: T,
    status_code: u16,
    metadata: Option<Map<String, Value>>,
) -> ApiEnvelope<T> {
    ApiResponseFormatter::default().format(data, status_code, metadata)
}
