use std::time::Duration;

use tracing::{debug, trace};

use crate::config::TimerConfig;
use crate::error::TimerError;
use crate::event::{EventKind, TimerEvent};
use crate::time::TimeParts;

/// Lifecycle phase of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not running, elapsed value at its initial setting.
    Stopped,
    Running,
    /// Not ticking, but the elapsed value is preserved for resuming.
    Paused,
    /// Completed naturally. Terminal until `reset`.
    Ended,
}

/// What the driver should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickDecision {
    /// Schedule the next tick after the given delay.
    Reschedule(Duration),
    /// The timer completed. Do not reschedule.
    Finished,
}

/// The timer state machine.
///
/// Every transition takes the clock reading as an argument and returns the
/// events to emit, so the machine itself is synchronous and deterministic;
/// the async driver in `timer.rs` supplies real time and delivers the
/// events. A tick never re-arms itself: it returns a [`TickDecision`] and
/// the driver acts on it.
pub(crate) struct TimerCore {
    config: TimerConfig,
    phase: Phase,
    /// Elapsed value captured at the most recent start or resume.
    start_ms: i64,
    /// Clock reading at the most recent start or resume.
    anchor_ms: i64,
    /// Current elapsed value. Changes only inside a tick or on
    /// start/reset.
    current_ms: i64,
    /// Elapsed value the schedule predicts for the next tick.
    expected_ms: i64,
    /// Signed offset between actual and expected elapsed time at the last
    /// tick. Positive means overshoot in both directions.
    drift_ms: i64,
    /// Bumped by every transition that cancels a pending tick. A driver
    /// that wakes under a stale epoch must exit without touching state.
    epoch: u64,
}

impl TimerCore {
    pub(crate) fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Stopped,
            start_ms: 0,
            anchor_ms: 0,
            current_ms: 0,
            expected_ms: 0,
            drift_ms: 0,
            epoch: 0,
        }
    }

    pub(crate) fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub(crate) fn time(&self) -> TimeParts {
        TimeParts::from_millis(self.current_ms)
    }

    fn snapshot(&self, kind: EventKind) -> TimerEvent {
        TimerEvent {
            kind,
            time: self.time(),
            running: self.is_running(),
            paused: self.is_paused(),
        }
    }

    /// Start from `Stopped`/`Ended`, or resume from `Paused`.
    ///
    /// Returns the `start` event to emit, or `None` when already running.
    pub(crate) fn begin(&mut self, now_ms: i64) -> Option<TimerEvent> {
        match self.phase {
            Phase::Running => None,
            Phase::Paused => {
                self.phase = Phase::Running;
                self.anchor_ms = now_ms;
                self.start_ms = self.current_ms;
                // The schedule re-anchors here; drift never includes the
                // pause gap.
                self.expected_ms = self.current_ms;
                self.epoch += 1;
                debug!(current_ms = self.current_ms, "timer resumed");
                Some(self.snapshot(EventKind::Start))
            }
            Phase::Stopped | Phase::Ended => {
                self.phase = Phase::Running;
                self.anchor_ms = now_ms;
                self.start_ms = self.config.start_time;
                self.current_ms = self.config.start_time;
                self.expected_ms = self.config.start_time;
                self.drift_ms = 0;
                self.epoch += 1;
                debug!(
                    start_ms = self.start_ms,
                    countdown = self.config.countdown,
                    "timer started"
                );
                Some(self.snapshot(EventKind::Start))
            }
        }
    }

    /// Like [`begin`](Self::begin), applying `config` first on a fresh
    /// start. A resume ignores the supplied configuration.
    pub(crate) fn begin_with(
        &mut self,
        now_ms: i64,
        config: TimerConfig,
    ) -> Result<Option<TimerEvent>, TimerError> {
        if matches!(self.phase, Phase::Stopped | Phase::Ended) {
            config.validate()?;
            self.config = config;
        }
        Ok(self.begin(now_ms))
    }

    /// One tick: recompute the elapsed value, decide whether the timer
    /// completed, and return the events to emit plus the reschedule
    /// instruction.
    pub(crate) fn tick(&mut self, now_ms: i64) -> (Vec<TimerEvent>, TickDecision) {
        let config = self.config;

        self.current_ms = if config.countdown {
            self.start_ms - (now_ms - self.anchor_ms)
        } else {
            (now_ms - self.anchor_ms) + self.start_ms
        };

        if config.self_adjust && !config.animation_frame {
            self.drift_ms = if config.countdown {
                self.expected_ms - self.current_ms
            } else {
                self.current_ms - self.expected_ms
            };
        }

        let completed = if config.countdown {
            config.end_time.is_some_and(|end| self.current_ms <= end) || self.current_ms <= 0
        } else {
            config.end_time.is_some_and(|end| self.current_ms >= end)
        };

        if completed {
            // An unbounded countdown completes at zero.
            self.current_ms = if config.countdown {
                config.end_time.unwrap_or(0)
            } else {
                config.end_time.unwrap_or(self.current_ms)
            };
            self.phase = Phase::Ended;
            debug!(current_ms = self.current_ms, "timer ended");
            let events = vec![
                self.snapshot(EventKind::Update),
                self.snapshot(EventKind::End),
            ];
            return (events, TickDecision::Finished);
        }

        let update = self.snapshot(EventKind::Update);

        if config.countdown {
            self.expected_ms -= config.update_frequency as i64;
        } else {
            self.expected_ms += config.update_frequency as i64;
        }

        // Overshoot shortens the next wait, undershoot lengthens it,
        // clamped to non-negative.
        let delay = if config.self_adjust && !config.animation_frame {
            Duration::from_millis((config.update_frequency as i64 - self.drift_ms).max(0) as u64)
        } else {
            Duration::from_millis(config.update_frequency)
        };
        trace!(
            current_ms = self.current_ms,
            drift_ms = self.drift_ms,
            delay_ms = delay.as_millis() as u64,
            "tick"
        );
        (vec![update], TickDecision::Reschedule(delay))
    }

    /// Stop a running timer. Returns the `stop` event, or `None` when not
    /// running (a paused timer can only resume or reset).
    pub(crate) fn halt(&mut self) -> Option<TimerEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        self.epoch += 1;
        self.phase = Phase::Stopped;
        debug!(current_ms = self.current_ms, "timer stopped");
        Some(self.snapshot(EventKind::Stop))
    }

    /// Pause a running timer, preserving the elapsed value. Returns the
    /// `pause` event, or `None` when not running.
    pub(crate) fn pause(&mut self) -> Option<TimerEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        self.epoch += 1;
        self.phase = Phase::Paused;
        debug!(current_ms = self.current_ms, "timer paused");
        Some(self.snapshot(EventKind::Pause))
    }

    /// Reset from any state back to `Stopped` with the elapsed value at
    /// its initial setting. Returns the events to emit: `stop` first when
    /// the timer was running, then `update` and `reset`.
    pub(crate) fn reset(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if let Some(stopped) = self.halt() {
            events.push(stopped);
        }
        self.epoch += 1;
        self.phase = Phase::Stopped;
        self.current_ms = self.config.start_time;
        self.expected_ms = self.config.start_time;
        debug!(start_ms = self.config.start_time, "timer reset");
        events.push(self.snapshot(EventKind::Update));
        events.push(self.snapshot(EventKind::Reset));
        events
    }

    /// Shift the timer's reference point by `delta_ms` without an
    /// immediate recompute; the next tick reflects the shift. No-op unless
    /// running.
    pub(crate) fn adjust(&mut self, delta_ms: i64) {
        if self.phase != Phase::Running {
            return;
        }
        self.expected_ms += delta_ms;
        self.start_ms += delta_ms;
        debug!(delta_ms, "timer adjusted");
    }
}
