//! Shared rate limiting for provider clients.
//!
//! All provider clients go through a governor limiter so that a daemon run
//! cannot burn through an API quota in one burst.

use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;

pub(crate) type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Default per-provider quota: 50 requests per minute.
pub(crate) fn default_limiter() -> Arc<DirectRateLimiter> {
    Arc::new(RateLimiter::direct(Quota::per_minute(nonzero!(50u32))))
}
