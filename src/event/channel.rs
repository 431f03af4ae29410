use async_channel::{Receiver, Sender};

use super::{EventBus, EventKind, Listener, ListenerId, TimerEvent};

/// Event backend that forwards every event into an `async_channel`.
///
/// Useful when the consumer lives in an async task: receive
/// [`TimerEvent`]s from the channel and filter on `event.kind`. Because
/// delivery is the channel itself, `add_listener`/`remove_listener` are
/// inert on this backend.
pub struct ChannelBus {
    sender: Sender<TimerEvent>,
}

impl ChannelBus {
    /// Wrap an existing sender.
    pub fn new(sender: Sender<TimerEvent>) -> Self {
        Self { sender }
    }

    /// Create a bus over a fresh unbounded channel, returning the
    /// receiving half.
    pub fn unbounded() -> (Self, Receiver<TimerEvent>) {
        let (sender, receiver) = async_channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl EventBus for ChannelBus {
    fn add_listener(&self, _kind: EventKind, _listener: Listener) -> ListenerId {
        ListenerId(0)
    }

    fn remove_listener(&self, _kind: EventKind, _id: ListenerId) -> bool {
        false
    }

    fn dispatch(&self, event: &TimerEvent) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.sender.try_send(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeParts;

    #[test]
    fn test_forwards_events() {
        let (bus, receiver) = ChannelBus::unbounded();
        bus.dispatch(&TimerEvent {
            kind: EventKind::Start,
            time: TimeParts::from_millis(0),
            running: true,
            paused: false,
        });
        bus.dispatch(&TimerEvent {
            kind: EventKind::Update,
            time: TimeParts::from_millis(100),
            running: true,
            paused: false,
        });

        assert_eq!(receiver.try_recv().unwrap().kind, EventKind::Start);
        let update = receiver.try_recv().unwrap();
        assert_eq!(update.kind, EventKind::Update);
        assert_eq!(update.time.milliseconds_total, 100);
    }

    #[test]
    fn test_dispatch_survives_dropped_receiver() {
        let (bus, receiver) = ChannelBus::unbounded();
        drop(receiver);
        bus.dispatch(&TimerEvent {
            kind: EventKind::Stop,
            time: TimeParts::from_millis(0),
            running: false,
            paused: false,
        });
    }
}
