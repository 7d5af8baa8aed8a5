//! Fixed-window rate limiting.
//!
//! Each limiter instance owns a private map of per-caller windows. A window
//! opens on a caller's first request, admits up to `max_requests` requests,
//! and is replaced by a fresh window on the first request at or after its
//! reset time. Instances never share state.

mod config;
mod service;


pub use config::RateLimitRule;
pub use service::{FixedWindowRateLimiter, rate_limiter};
