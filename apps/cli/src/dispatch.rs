use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use toolbelt_application::loose::{
    filter_and_search_users_value, route_matcher_value, validate_and_hash_password_value,
};
use toolbelt_application::{
    ApiResponseFormatter, Clock, FixedWindowRateLimiter, SystemClock, is_even,
};
use tracing::warn;

use crate::cli_config::CliConfig;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
enum Request {
    IsEven {
        #[serde(default)]
        value: Value,
    },
    FilterUsers {
        #[serde(default)]
        users: Value,
        #[serde(default)]
        search_term: Option<String>,
        #[serde(default)]
        filters: Value,
    },
    FormatResponse {
        #[serde(default)]
        data: Value,
        status_code: u16,
        #[serde(default)]
        metadata: Option<Map<String, Value>>,
    },
    ValidatePassword {
        #[serde(default)]
        password: Value,
        #[serde(default)]
        requirements: Option<Value>,
    },
    RateLimit {
        #[serde(default)]
        user_id: Value,
        #[serde(default)]
        timestamp: Option<i64>,
    },
    MatchRoute {
        #[serde(default)]
        routes: Value,
        #[serde(default)]
        path: Value,
    },
}

/// Routes request lines to the toolbelt functions.
///
/// One limiter lives for the whole process, so `rate_limit` requests from the
/// same caller share a window.
pub struct Dispatcher {
    formatter: ApiResponseFormatter,
    limiter: FixedWindowRateLimiter<String>,
    default_requirements: Value,
}

impl Dispatcher {
    pub fn new(config: &CliConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CliConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            formatter: ApiResponseFormatter::new(Arc::clone(&clock)),
            limiter: FixedWindowRateLimiter::with_clock(config.rate_limit, clock),
            default_requirements: to_json(config.default_password_requirements()),
        }
    }

    /// Handles one JSON request line and returns the JSON response.
    pub fn handle_line(&self, line: &str) -> Value {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(error) => {
                warn!(error = %error, "rejected malformed request");
                json!({ "error": format!("invalid request: {error}") })
            }
        }
    }

    fn handle(&self, request: Request) -> Value {
        match request {
            Request::IsEven { value } => match is_even(&value) {
                Ok(even) => Value::Bool(even),
                Err(error) => json!({ "error": error.to_string() }),
            },
            Request::FilterUsers {
                users,
                search_term,
                filters,
            } => to_json(filter_and_search_users_value(
                &users,
                search_term.as_deref(),
                &filters,
            )),
            Request::FormatResponse {
                data,
                status_code,
                metadata,
            } => to_json(self.formatter.format(data, status_code, metadata)),
            Request::ValidatePassword {
                password,
                requirements,
            } => to_json(validate_and_hash_password_value(
                &password,
                requirements.as_ref().unwrap_or(&self.default_requirements),
            )),
            Request::RateLimit { user_id, timestamp } => {
                to_json(self.limiter.check(caller_key(&user_id), timestamp))
            }
            Request::MatchRoute { routes, path } => to_json(route_matcher_value(&routes, &path)),
        }
    }
}

/// String ids are used as-is; any other JSON value keys by its rendering.
fn caller_key(user_id: &Value) -> String {
    match user_id {
        Value::String(value) => value.clone(),
        other => other.to_string(),
    }
}

fn to_json(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or_else(|error| json!({ "error": error.to_string() }))
}
