//! Manually advanced clock

use crate::drivers::Clock;
use parking_lot::Mutex;
use std::sync::Arc;

/// Clock that only moves when told to. `delay_ms` advances it instantly.
#[derive(Clone, Debug, Default)]
pub struct MockClock {
    now: Arc<Mutex<u64>>,
}

impl MockClock {
    /// Clock starting at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        *self.now.lock() += ms;
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: u64) {
        *self.now.lock() = ms;
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> u64 {
        *self.now.lock()
    }

    fn delay_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}
