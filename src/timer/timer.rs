use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::config::TimerConfig;
use crate::error::TimerError;
use crate::event::{CallbackBus, EventBus, EventKind, ListenerId, TimerEvent};
use crate::time::TimeParts;
use crate::timer::Clock;
use crate::timer::core::{Phase, TickDecision, TimerCore};
use crate::timer::scheduler::{Scheduler, TokioScheduler};

/// A self-adjusting interval timer.
///
/// The timer drives itself on the tokio runtime: `start` spawns a tick
/// driver that repeatedly recomputes the elapsed time, emits `update`
/// events through the configured [`EventBus`], and reschedules itself
/// with a drift-compensated delay until the completion threshold is
/// reached or the timer is stopped, paused, or reset.
///
/// All control methods are defensive no-ops when called in a state they
/// do not apply to, so listeners only ever see transitions that actually
/// happened.
pub struct Timer {
    core: Arc<Mutex<TimerCore>>,
    clock: Arc<Clock>,
    bus: Arc<dyn EventBus>,
    scheduler: Arc<dyn Scheduler>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl Timer {
    /// Create a timer with the given configuration and the default
    /// callback event bus.
    pub fn new(config: TimerConfig) -> Result<Self, TimerError> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> TimerBuilder {
        TimerBuilder::new()
    }

    fn lock_core(&self) -> MutexGuard<'_, TimerCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_driver(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the timer, or resume it from a pause. No-op while running.
    ///
    /// Must be called within a tokio runtime: the tick driver is spawned
    /// onto it.
    pub fn start(&self) {
        let now_ms = self.clock.now_ms();
        let launched = {
            let mut core = self.lock_core();
            core.begin(now_ms).map(|event| (event, core.epoch()))
        };
        if let Some((event, epoch)) = launched {
            self.bus.dispatch(&event);
            self.spawn_driver(epoch);
        }
    }

    /// Start the timer with a new configuration. When the timer is
    /// paused, the configuration is ignored and the timer resumes; a
    /// fresh start validates and adopts it.
    pub fn start_with(&self, config: TimerConfig) -> Result<(), TimerError> {
        let now_ms = self.clock.now_ms();
        let launched = {
            let mut core = self.lock_core();
            core.begin_with(now_ms, config)?
                .map(|event| (event, core.epoch()))
        };
        if let Some((event, epoch)) = launched {
            self.bus.dispatch(&event);
            self.spawn_driver(epoch);
        }
        Ok(())
    }

    /// Stop the timer. No-op unless running; a paused timer can only
    /// resume or reset.
    pub fn stop(&self) {
        let event = self.lock_core().halt();
        if let Some(event) = event {
            self.abort_driver();
            self.bus.dispatch(&event);
        }
    }

    /// Pause the timer, preserving the elapsed value for a later
    /// [`start`](Self::start). No-op unless running.
    pub fn pause(&self) {
        let event = self.lock_core().pause();
        if let Some(event) = event {
            self.abort_driver();
            self.bus.dispatch(&event);
        }
    }

    /// Reset the timer to its initial elapsed value, from any state.
    pub fn reset(&self) {
        let events = self.lock_core().reset();
        self.abort_driver();
        for event in &events {
            self.bus.dispatch(event);
        }
    }

    /// Shift the running timer's reference point by `delta_ms`, positive
    /// or negative. The next tick reflects the shift. No-op unless
    /// running.
    ///
    /// Useful for folding an external gap (host suspension, a missed
    /// interval) into the clock without a full restart.
    pub fn adjust_time(&self, delta_ms: i64) {
        self.lock_core().adjust(delta_ms);
    }

    /// The current elapsed value, broken down into display units.
    pub fn time(&self) -> TimeParts {
        self.lock_core().time()
    }

    pub fn phase(&self) -> Phase {
        self.lock_core().phase()
    }

    pub fn is_running(&self) -> bool {
        self.lock_core().is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.lock_core().is_paused()
    }

    /// The configuration the timer is currently running with.
    pub fn config(&self) -> TimerConfig {
        *self.lock_core().config()
    }

    /// Register a listener for one event kind on the underlying bus.
    pub fn add_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&TimerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.bus.add_listener(kind, Arc::new(listener))
    }

    /// Deregister a listener. Returns whether anything was removed.
    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.bus.remove_listener(kind, id)
    }

    /// Alias for [`add_listener`](Self::add_listener).
    pub fn on(
        &self,
        kind: EventKind,
        listener: impl Fn(&TimerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.add_listener(kind, listener)
    }

    /// Alias for [`remove_listener`](Self::remove_listener).
    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        self.remove_listener(kind, id)
    }

    fn spawn_driver(&self, epoch: u64) {
        let core = Arc::clone(&self.core);
        let clock = Arc::clone(&self.clock);
        let bus = Arc::clone(&self.bus);
        let scheduler = Arc::clone(&self.scheduler);

        let handle = tokio::spawn(async move {
            loop {
                let (events, decision, animation_frame) = {
                    let mut core = core.lock().unwrap_or_else(PoisonError::into_inner);
                    // A control call may have invalidated this driver
                    // while it was waiting.
                    if core.epoch() != epoch || !core.is_running() {
                        return;
                    }
                    let animation_frame = core.config().animation_frame;
                    let (events, decision) = core.tick(clock.now_ms());
                    (events, decision, animation_frame)
                };
                for event in &events {
                    bus.dispatch(event);
                }
                match decision {
                    TickDecision::Finished => return,
                    TickDecision::Reschedule(delay) => {
                        if animation_frame {
                            scheduler.wait_frame().await;
                        } else {
                            scheduler.wait(delay).await;
                        }
                    }
                }
            }
        });

        // Any earlier driver is already invalidated by the epoch bump;
        // dropping its handle just detaches it.
        drop(self.lock_driver().replace(handle));
    }

    fn abort_driver(&self) {
        if let Some(handle) = self.lock_driver().take() {
            handle.abort();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.abort_driver();
    }
}

/// Assembles a [`Timer`] from a configuration plus optional injected
/// collaborators.
pub struct TimerBuilder {
    config: TimerConfig,
    bus: Option<Arc<dyn EventBus>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl TimerBuilder {
    pub fn new() -> Self {
        Self {
            config: TimerConfig::default(),
            bus: None,
            scheduler: None,
        }
    }

    pub fn config(mut self, config: TimerConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject the event delivery backend. Defaults to a fresh
    /// [`CallbackBus`].
    pub fn bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Inject the scheduling backend. Defaults to [`TokioScheduler`].
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Validate the configuration and build the timer. The timer does
    /// not tick until [`Timer::start`] is called.
    pub fn build(self) -> Result<Timer, TimerError> {
        self.config.validate()?;
        Ok(Timer {
            core: Arc::new(Mutex::new(TimerCore::new(self.config))),
            clock: Arc::new(Clock::new()),
            bus: self.bus.unwrap_or_else(|| Arc::new(CallbackBus::new())),
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Arc::new(TokioScheduler::new())),
            driver: Mutex::new(None),
        })
    }
}

impl Default for TimerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
