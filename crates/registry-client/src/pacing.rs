//! # Pacing Policy
//!
//! Scheduler policy for sequential dispatch against a rate-limited
//! remote. The policy decides how long to wait before each call; the
//! client awaits that duration and then dispatches. Keeping the policy
//! behind a trait lets the discipline change (e.g. exponential backoff)
//! without touching call sites.

use std::time::Duration;

/// Decides the pause inserted before each sequential call.
pub trait PacingPolicy: Send + Sync {
    /// Delay to wait before dispatching call `call_index` (0-based).
    ///
    /// The first call is never delayed; `call_index` is `>= 1` for all
    /// subsequent calls.
    fn delay_before(&self, call_index: usize) -> Duration;
}

/// Fixed inter-call delay, the design default (1 second).
///
/// Applied between successive calls regardless of whether the previous
/// call succeeded or failed. Not adaptive.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// The default one-second delay.
    #[must_use]
    pub fn one_second() -> Self {
        Self(Duration::from_secs(1))
    }

    /// A fixed delay in milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl PacingPolicy for FixedDelay {
    fn delay_before(&self, call_index: usize) -> Duration {
        if call_index == 0 {
            Duration::ZERO
        } else {
            self.0
        }
    }
}

/// No pacing at all. Test use only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl PacingPolicy for NoDelay {
    fn delay_before(&self, _call_index: usize) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delay_skips_first_call() {
        let policy = FixedDelay::one_second();
        assert_eq!(policy.delay_before(0), Duration::ZERO);
        assert_eq!(policy.delay_before(1), Duration::from_secs(1));
        assert_eq!(policy.delay_before(7), Duration::from_secs(1));
    }

    #[test]
    fn no_delay_is_always_zero() {
        assert_eq!(NoDelay.delay_before(0), Duration::ZERO);
        assert_eq!(NoDelay.delay_before(100), Duration::ZERO);
    }
}
