//! Application services and ports.

#![forbid(unsafe_code)]

mod clock;
pub mod loose;
mod parity;
mod password_service;
mod rate_limit_service;
mod response_service;
mod route_service;
mod user_search_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use parity::is_even;
pub use password_service::validate_and_hash_password;
pub use rate_limit_service::{FixedWindowRateLimiter, RateLimitRule, rate_limiter};
pub use response_service::{ApiResponseFormatter, format_api_response};
pub use route_service::{parse_query, route_matcher, split_path};
pub use user_search_service::{filter_and_search_users, locale_compare};
