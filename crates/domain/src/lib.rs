//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod lenient;
mod password;
mod rate_limit;
mod response;
mod route;
mod user;

pub use password::{
    PASSWORD_EMPTY_ERROR, PasswordRequirements, PasswordValidation, SPECIAL_CHARACTERS,
    password_checksum,
};
pub use rate_limit::{RateLimitDecision, RateLimitWindow};
pub use response::{ApiEnvelope, TIMESTAMP_METADATA_KEY, is_success_status, status_message};
pub use route::{RouteDefinition, RouteMatch, RoutePattern};
pub use user::{User, UserFilter, parse_calendar_instant};
