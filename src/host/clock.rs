use std::time::Instant;

/// Monotonic tick source for the `GetTickCount` capability. Ticks are
/// milliseconds since host creation and never decrease.
pub struct TickClock {
    origin: Instant,
}

impl TickClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
