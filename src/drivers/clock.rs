//! Monotonic clock trait

/// Millisecond clock. Wraparound is not handled.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_millis(&self) -> u64;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u64);
}

/// Wall clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
