//! A self-adjusting interval timer on the tokio runtime.
//!
//! [`Timer`] is a count-up or countdown clock that periodically emits its
//! elapsed time and a completion event. Between ticks it measures the
//! drift between the elapsed time the schedule predicted and the elapsed
//! time actually observed, and shortens or lengthens the next wait to
//! compensate, so long-running clocks stay on the wall-clock grid instead
//! of accumulating scheduler latency.
//!
//! Events are delivered through an injectable [`EventBus`]: the default
//! [`CallbackBus`] invokes registered callbacks, and [`ChannelBus`] feeds
//! an `async_channel` for consumers that live in async tasks.
//!
//! ```no_run
//! use interval_timer::{EventKind, Timer, TimerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), interval_timer::TimerError> {
//!     let timer = Timer::new(
//!         TimerConfig::default()
//!             .with_end_time(10_000)
//!             .with_update_frequency(1_000),
//!     )?;
//!
//!     timer.on(EventKind::Update, |event| {
//!         println!("{} seconds elapsed", event.time.seconds_total);
//!     });
//!     timer.on(EventKind::End, |event| {
//!         println!("done after {} seconds", event.time.seconds_total);
//!     });
//!
//!     timer.start();
//!     tokio::time::sleep(std::time::Duration::from_secs(11)).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod time;
pub mod timer;

pub use config::TimerConfig;
pub use error::TimerError;
pub use event::{CallbackBus, ChannelBus, EventBus, EventKind, Listener, ListenerId, TimerEvent};
pub use time::{TimeParts, pad};
pub use timer::{Phase, Scheduler, Timer, TimerBuilder, TokioScheduler};
