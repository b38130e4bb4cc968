//! Shared wall-clock budget.

use std::time::{Duration, Instant};

/// Default ceiling: ten minutes minus one second.
pub const DEFAULT_CEILING: Duration = Duration::from_secs(599);

/// Monotonically shrinking time budget anchored at a start instant.
///
/// Every phase reads [`remaining`](Self::remaining) immediately before
/// starting work and hands it (optionally capped) to the call it makes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_wave::budget::TimeBudget;
///
/// let budget = TimeBudget::new(Duration::from_secs(10));
/// assert!(!budget.is_exhausted());
/// assert!(budget.limit(Some(Duration::from_secs(2))) <= Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    ceiling: Duration,
}

impl TimeBudget {
    /// Starts a budget now.
    pub fn new(ceiling: Duration) -> Self {
        Self::starting_at(Instant::now(), ceiling)
    }

    /// Starts a budget at an earlier instant (e.g. process start).
    pub fn starting_at(start: Instant, ceiling: Duration) -> Self {
        Self { start, ceiling }
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left before the ceiling, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.ceiling.saturating_sub(self.start.elapsed())
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Limit for the next call: the remaining time, optionally capped.
    pub fn limit(&self, cap: Option<Duration>) -> Duration {
        let remaining = self.remaining();
        match cap {
            Some(cap) => remaining.min(cap),
            None => remaining,
        }
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::new(DEFAULT_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_exhausted() {
        let budget = TimeBudget::new(Duration::ZERO);
        assert!(budget.is_exhausted());
        assert_eq!(budget.limit(Some(Duration::from_secs(5))), Duration::ZERO);
    }

    #[test]
    fn test_remaining_non_increasing() {
        let budget = TimeBudget::new(Duration::from_secs(60));
        let a = budget.remaining();
        std::thread::sleep(Duration::from_millis(2));
        let b = budget.remaining();
        assert!(b <= a);
    }

    #[test]
    fn test_started_in_past_saturates() {
        let Some(start) = Instant::now().checked_sub(Duration::from_secs(5)) else {
            return;
        };
        let budget = TimeBudget::starting_at(start, Duration::from_secs(1));
        assert!(budget.is_exhausted());
        assert!(budget.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn test_cap_applies() {
        let budget = TimeBudget::new(Duration::from_secs(600));
        assert_eq!(
            budget.limit(Some(Duration::from_millis(10))),
            Duration::from_millis(10)
        );
        assert!(budget.limit(None) > Duration::from_secs(500));
    }
}
