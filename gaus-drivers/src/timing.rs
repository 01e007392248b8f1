//! Monotonic timing helpers
//!
//! Small utilities over [`MonotonicClock`] shared by the drivers: a wrapping
//! millisecond rate limiter and a per-wait microsecond deadline.

use gaus_hal::MonotonicClock;

/// Milliseconds from `since` to `now` on a wrapping 32-bit counter
#[inline]
pub fn elapsed_ms(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Minimum-interval gate on a wrapping millisecond timestamp
///
/// Every permitted attempt restarts the interval, whatever its outcome.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimiter {
    last_ms: u32,
    interval_ms: u32,
}

impl RateLimiter {
    /// Create a limiter that already permits an attempt at `now_ms`
    pub fn new_ready(now_ms: u32, interval_ms: u32) -> Self {
        Self {
            // Wraps when `now_ms < interval_ms`; so does the subtraction in
            // `is_ready`, which keeps the first attempt unthrottled.
            last_ms: now_ms.wrapping_sub(interval_ms),
            interval_ms,
        }
    }

    /// Whether the interval has passed since the last attempt
    pub fn is_ready(&self, now_ms: u32) -> bool {
        elapsed_ms(self.last_ms, now_ms) >= self.interval_ms
    }

    /// Record an attempt at `now_ms`
    pub fn mark(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    /// Gate an attempt: returns true and records it if allowed
    ///
    /// `force` bypasses the interval check but still records the attempt.
    pub fn try_acquire(&mut self, now_ms: u32, force: bool) -> bool {
        if !force && !self.is_ready(now_ms) {
            return false;
        }
        self.mark(now_ms);
        true
    }

    /// Timestamp of the last recorded attempt
    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// Microsecond budget for a single wait
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start_us: u64,
    budget_us: u32,
}

impl Deadline {
    /// Start the budget now
    pub fn start<C: MonotonicClock>(clock: &C, budget_us: u32) -> Self {
        Self {
            start_us: clock.now_micros(),
            budget_us,
        }
    }

    /// Microseconds since the deadline started
    pub fn elapsed_us<C: MonotonicClock>(&self, clock: &C) -> u64 {
        clock.now_micros().wrapping_sub(self.start_us)
    }

    /// Whether the budget is used up
    pub fn expired<C: MonotonicClock>(&self, clock: &C) -> bool {
        self.elapsed_us(clock) >= self.budget_us as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct ManualClock(Cell<u64>);

    impl MonotonicClock for ManualClock {
        fn now_micros(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn test_first_attempt_never_throttled() {
        // Boot time: counter below the interval
        let limiter = RateLimiter::new_ready(5, 2_000);
        assert!(limiter.is_ready(5));

        let limiter = RateLimiter::new_ready(100_000, 2_000);
        assert!(limiter.is_ready(100_000));
    }

    #[test]
    fn test_interval_enforced() {
        let mut limiter = RateLimiter::new_ready(0, 2_000);
        assert!(limiter.try_acquire(10, false));
        assert!(!limiter.try_acquire(1_000, false));
        assert!(!limiter.try_acquire(2_009, false));
        assert!(limiter.try_acquire(2_010, false));
        assert_eq!(limiter.last_ms(), 2_010);
    }

    #[test]
    fn test_force_bypasses_and_restarts() {
        let mut limiter = RateLimiter::new_ready(0, 2_000);
        assert!(limiter.try_acquire(0, false));
        assert!(limiter.try_acquire(500, true));
        // Forced attempt restarted the interval
        assert!(!limiter.try_acquire(2_000, false));
        assert!(limiter.try_acquire(2_500, false));
    }

    #[test]
    fn test_counter_wraparound() {
        let mut limiter = RateLimiter::new_ready(0, 2_000);
        limiter.mark(u32::MAX - 500);
        assert!(!limiter.is_ready(1_000));
        assert!(limiter.is_ready(1_500));
    }

    #[test]
    fn test_deadline() {
        let clock = ManualClock(Cell::new(1_000));
        let deadline = Deadline::start(&clock, 1_000);
        assert!(!deadline.expired(&clock));

        clock.0.set(1_999);
        assert!(!deadline.expired(&clock));
        assert_eq!(deadline.elapsed_us(&clock), 999);

        clock.0.set(2_000);
        assert!(deadline.expired(&clock));
    }
}
