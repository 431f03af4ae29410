use crate::error::TimerError;

/// Configuration for a [`Timer`](crate::Timer).
///
/// All fields have defaults, so a plain `TimerConfig::default()` yields an
/// unbounded count-up clock ticking every 100 ms with drift compensation on.
/// The `with_*` setters chain for inline construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Initial elapsed value in milliseconds.
    pub start_time: i64,
    /// Completion threshold in milliseconds, `None` for unbounded.
    /// A countdown still completes at zero when unbounded.
    pub end_time: Option<i64>,
    /// Nominal tick period in milliseconds. Must be greater than zero.
    pub update_frequency: u64,
    /// Compensate for scheduling drift by adjusting the next tick's delay.
    pub self_adjust: bool,
    /// Run toward zero instead of up from `start_time`.
    pub countdown: bool,
    /// Pace ticks at the display refresh period instead of
    /// `update_frequency`. Drift compensation is not applied in this mode.
    pub animation_frame: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            start_time: 0,
            end_time: None,
            update_frequency: 100,
            self_adjust: true,
            countdown: false,
            animation_frame: false,
        }
    }
}

impl TimerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_time(mut self, ms: i64) -> Self {
        self.start_time = ms;
        self
    }

    pub fn with_end_time(mut self, ms: i64) -> Self {
        self.end_time = Some(ms);
        self
    }

    pub fn with_unbounded_end(mut self) -> Self {
        self.end_time = None;
        self
    }

    pub fn with_update_frequency(mut self, ms: u64) -> Self {
        self.update_frequency = ms;
        self
    }

    pub fn with_self_adjust(mut self, self_adjust: bool) -> Self {
        self.self_adjust = self_adjust;
        self
    }

    pub fn with_countdown(mut self, countdown: bool) -> Self {
        self.countdown = countdown;
        self
    }

    pub fn with_animation_frame(mut self, animation_frame: bool) -> Self {
        self.animation_frame = animation_frame;
        self
    }

    /// Check the configuration for values the timer cannot run with.
    ///
    /// Rejects a zero `update_frequency` and an `end_time` on the wrong
    /// side of `start_time` for the configured direction. An `end_time`
    /// equal to `start_time` is accepted and completes on the first tick.
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.update_frequency == 0 {
            return Err(TimerError::InvalidFrequency(
                "update frequency must be greater than 0".to_string(),
            ));
        }
        if let Some(end) = self.end_time {
            if self.countdown && end > self.start_time {
                return Err(TimerError::InvalidEndTime(format!(
                    "countdown end time({end}) must not exceed start time({})",
                    self.start_time
                )));
            }
            if !self.countdown && end < self.start_time {
                return Err(TimerError::InvalidEndTime(format!(
                    "count-up end time({end}) must not precede start time({})",
                    self.start_time
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.start_time, 0);
        assert_eq!(config.end_time, None);
        assert_eq!(config.update_frequency, 100);
        assert!(config.self_adjust);
        assert!(!config.countdown);
        assert!(!config.animation_frame);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters_chain() {
        let config = TimerConfig::new()
            .with_start_time(1000)
            .with_end_time(0)
            .with_update_frequency(50)
            .with_self_adjust(false)
            .with_countdown(true)
            .with_animation_frame(true);
        assert_eq!(config.start_time, 1000);
        assert_eq!(config.end_time, Some(0));
        assert_eq!(config.update_frequency, 50);
        assert!(!config.self_adjust);
        assert!(config.countdown);
        assert!(config.animation_frame);
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let config = TimerConfig::default().with_update_frequency(0);
        assert!(matches!(
            config.validate(),
            Err(TimerError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_sided_end_time() {
        // Count-up toward an end below the start.
        let config = TimerConfig::default().with_start_time(500).with_end_time(100);
        assert!(matches!(config.validate(), Err(TimerError::InvalidEndTime(_))));

        // Countdown toward an end above the start.
        let config = TimerConfig::default()
            .with_countdown(true)
            .with_start_time(100)
            .with_end_time(500);
        assert!(matches!(config.validate(), Err(TimerError::InvalidEndTime(_))));
    }

    #[test]
    fn test_accepts_equal_end_time() {
        let config = TimerConfig::default().with_start_time(500).with_end_time(500);
        assert!(config.validate().is_ok());

        let config = TimerConfig::default()
            .with_countdown(true)
            .with_start_time(500)
            .with_end_time(500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unbounded_countdown_is_valid() {
        let config = TimerConfig::default()
            .with_countdown(true)
            .with_start_time(1000);
        assert!(config.validate().is_ok());
    }
}
