use std::env;
use std::fmt::Display;
use std::str::FromStr;

use toolbelt_application::RateLimitRule;
use toolbelt_core::{AppError, AppResult};
use toolbelt_domain::PasswordRequirements;

const RATE_LIMIT_WINDOW_MS: &str = "TOOLBELT_RATE_LIMIT_WINDOW_MS";
const RATE_LIMIT_MAX_REQUESTS: &str = "TOOLBELT_RATE_LIMIT_MAX_REQUESTS";
const PASSWORD_MIN_LENGTH: &str = "TOOLBELT_PASSWORD_MIN_LENGTH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub rate_limit: RateLimitRule,
    pub password_min_length: usize,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let window_ms = parse_var(&lookup, RATE_LIMIT_WINDOW_MS, 60_000_u64)?;
        let max_requests = parse_var(&lookup, RATE_LIMIT_MAX_REQUESTS, 100_u32)?;
        let password_min_length = parse_var(&lookup, PASSWORD_MIN_LENGTH, 8_usize)?;

        let rate_limit = RateLimitRule::new(window_ms, max_requests);
        rate_limit.validate()?;

        Ok(Self {
            rate_limit,
            password_min_length,
        })
    }

    /// Requirements applied when a request does not carry its own.
    pub fn default_password_requirements(&self) -> PasswordRequirements {
        PasswordRequirements::default().with_min_length(self.password_min_length)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<T>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
