use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use toolbelt_domain::{RateLimitDecision, RateLimitWindow};
use tracing::{debug, trace};

use crate::{Clock, SystemClock};

use super::config::RateLimitRule;

/// Per-caller fixed-window rate limiter.
///
/// Window state lives behind a mutex owned by this instance, so a limiter can
/// be shared across threads through an `Arc` without lost updates.
pub struct FixedWindowRateLimiter<K> {
    rule: RateLimitRule,
    clock: Arc<dyn Clock>,
    windows: Mutex<HashMap<K, RateLimitWindow>>,
}

impl<K> FixedWindowRateLimiter<K>
where
    K: Eq + Hash + Debug,
{
    /// Creates a limiter that reads the system clock for untimed requests.
    #[must_use]
    pub fn new(rule: RateLimitRule) -> Self {
        Self::with_clock(rule, Arc::new(SystemClock))
    }

    /// Creates a limiter with an explicit clock.
    #[must_use]
    pub fn with_clock(rule: RateLimitRule, clock: Arc<dyn Clock>) -> Self {
        Self {
            rule,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the rule this limiter enforces.
    #[must_use]
    pub fn rule(&self) -> RateLimitRule {
        self.rule
    }

    /// Records one request from `caller` at `timestamp` (milliseconds since
    /// the Unix epoch; the clock's current instant when `None`).
    pub fn check(&self, caller: K, timestamp: Option<i64>) -> RateLimitDecision {
        let now = timestamp.unwrap_or_else(|| self.clock.now_millis());
        let max_requests = self.rule.max_requests;
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(window) = windows
            .get_mut(&caller)
            .filter(|window| !window.is_expired(now))
        {
            if window.count < max_requests {
                window.count += 1;
                return RateLimitDecision {
                    allowed: true,
                    remaining_requests: max_requests - window.count,
                    reset_time: window.reset_time,
                };
            }

            debug!(
                caller = ?caller,
                count = window.count,
                reset_time = window.reset_time,
                "rate limit exceeded"
            );
            return RateLimitDecision {
                allowed: false,
                remaining_requests: 0,
                reset_time: window.reset_time,
            };
        }

        let window = RateLimitWindow::open(now, self.rule.window_ms);
        trace!(caller = ?caller, reset_time = window.reset_time, "rate limit window opened");
        windows.insert(caller, window);

        RateLimitDecision {
            allowed: true,
            remaining_requests: max_requests.saturating_sub(1),
            reset_time: window.reset_time,
        }
    }

    /// Returns a snapshot of the window tracked for `caller`, if any.
    #[must_use]
    pub fn window(&self, caller: &K) -> Option<RateLimitWindow> {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(caller)
            .copied()
    }

    /// Returns how many callers currently have a window.
    #[must_use]
    pub fn tracked_callers(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Builds a fixed-window gate function with its own private state.
///
/// The returned closure takes `(caller, timestamp)` and behaves like
/// [`FixedWindowRateLimiter::check`].
pub fn rate_limiter<K>(
    window_ms: u64,
    max_requests: u32,
) -> impl Fn(K, Option<i64>) -> RateLimitDecision + Send + Sync
where
    K: Eq + Hash + Debug + Send,
{
    let limiter = FixedWindowRateLimiter::new(RateLimitRule::new(window_ms, max_requests));
    move |caller, timestamp| limiter.check(caller, timestamp)
}
