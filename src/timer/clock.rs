use tokio::time::Instant;

/// Monotonic clock reporting whole milliseconds since its creation.
pub(crate) struct Clock {
    origin: Instant,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}
