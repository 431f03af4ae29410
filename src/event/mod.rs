mod callback;
mod channel;

pub use callback::CallbackBus;
pub use channel::ChannelBus;

use std::fmt;
use std::sync::Arc;

use crate::time::TimeParts;

/// The lifecycle events a [`Timer`](crate::Timer) emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The timer started or resumed.
    Start,
    /// The timer was stopped.
    Stop,
    /// The timer was paused.
    Pause,
    /// The timer was reset.
    Reset,
    /// A tick recomputed the elapsed time. Also emitted on reset.
    Update,
    /// The timer reached its completion threshold.
    End,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Stop => "stop",
            EventKind::Pause => "pause",
            EventKind::Reset => "reset",
            EventKind::Update => "update",
            EventKind::End => "end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a timer delivered as the payload of every event.
#[derive(Debug, Clone, Copy)]
pub struct TimerEvent {
    pub kind: EventKind,
    /// The elapsed-time breakdown at the moment the event was produced.
    pub time: TimeParts,
    pub running: bool,
    pub paused: bool,
}

/// A registered event callback.
pub type Listener = Arc<dyn Fn(&TimerEvent) + Send + Sync>;

/// Token identifying a registered listener, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listener registry the timer dispatches its events through.
///
/// The backend is chosen by the host at construction time: [`CallbackBus`]
/// for in-process callbacks, [`ChannelBus`] to feed an async consumer, or
/// any other publish/subscribe mechanism the host already has.
pub trait EventBus: Send + Sync {
    /// Register a listener for one event kind. Listeners registered for
    /// the same kind are delivered in registration order.
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Deregister a listener. Returns whether anything was removed.
    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool;

    /// Deliver an event to every listener registered for its kind.
    fn dispatch(&self, event: &TimerEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Start.as_str(), "start");
        assert_eq!(EventKind::Update.to_string(), "update");
        assert_eq!(EventKind::End.to_string(), "end");
    }
}
