//! Time source abstractions

/// Free-running monotonic clock with microsecond resolution
///
/// Must never go backwards. Wrap-around of the 64-bit counter is not a
/// practical concern; millisecond views derived from it wrap at `u32`.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed epoch (usually boot)
    fn now_micros(&self) -> u64;

    /// Milliseconds since the same epoch, truncated to 32 bits
    ///
    /// Truncation wraps every ~49.7 days; compare values with
    /// `wrapping_sub` only.
    fn now_millis(&self) -> u32 {
        (self.now_micros() / 1_000) as u32
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}
