use std::time::Duration;

use tokio::time::sleep;

/// Deferred-callback collaborator the tick driver sleeps on between
/// ticks.
///
/// Implementations provide a schedule-once-after-delay wait and a
/// refresh-driven variant used when the timer runs in animation-frame
/// mode. Injecting a custom implementation lets the host own the
/// scheduling primitive (a test clock, a frame callback, ...).
#[async_trait::async_trait]
pub trait Scheduler: Send + Sync + 'static {
    /// Wait `delay` before the next tick.
    async fn wait(&self, delay: Duration);

    /// Wait one display refresh period.
    async fn wait_frame(&self);
}

/// Default scheduler backed by the tokio timer, with a 60 Hz frame
/// period.
pub struct TokioScheduler {
    frame_period: Duration,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self {
            frame_period: Duration::from_micros(16_667),
        }
    }

    /// Override the refresh period used by [`wait_frame`](Scheduler::wait_frame).
    pub fn with_frame_period(frame_period: Duration) -> Self {
        Self { frame_period }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Scheduler for TokioScheduler {
    async fn wait(&self, delay: Duration) {
        sleep(delay).await;
    }

    async fn wait_frame(&self) {
        sleep(self.frame_period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_delay() {
        let scheduler = TokioScheduler::new();
        let before = Instant::now();
        scheduler.wait(Duration::from_millis(250)).await;
        assert_eq!(before.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_frame_uses_frame_period() {
        let scheduler = TokioScheduler::with_frame_period(Duration::from_millis(20));
        let before = Instant::now();
        scheduler.wait_frame().await;
        assert_eq!(before.elapsed(), Duration::from_millis(20));
    }
}
