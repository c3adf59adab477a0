//! Rate limiting for Reddit API calls.
//!
//! Every outbound call goes through a governor limiter so a daemon run over
//! many subreddits cannot burst past Reddit's OAuth quota.

use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;

pub(crate) type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Reddit allows 60 OAuth requests per minute.
pub(crate) fn default_limiter() -> Arc<DirectRateLimiter> {
    Arc::new(RateLimiter::direct(Quota::per_minute(nonzero!(60u32))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denies_burst_past_quota() {
        let limiter = default_limiter();
        for _ in 0..60 {
            assert!(limiter.check().is_ok());
        }
        assert!(limiter.check().is_err());
    }
}
