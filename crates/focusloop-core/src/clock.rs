//! Wall-clock abstraction.
//!
//! The engine computes remaining time from epoch-millisecond timestamps.
//! Production code uses [`SystemClock`]; tests substitute a manually
//! advanced clock to simulate late ticks and suspensions.

/// Source of "now" for the timer engine.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
