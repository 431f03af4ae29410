use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::{EventBus, EventKind, Listener, ListenerId, TimerEvent};

/// In-process listener registry keyed by event kind.
///
/// Removal is by the [`ListenerId`] handed out at registration, since
/// closures cannot be compared for identity.
pub struct CallbackBus {
    listeners: DashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl CallbackBus {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for CallbackBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for CallbackBus {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        match self.listeners.get_mut(&kind) {
            Some(mut entry) => {
                let before = entry.len();
                entry.retain(|(listener_id, _)| *listener_id != id);
                entry.len() != before
            }
            None => false,
        }
    }

    fn dispatch(&self, event: &TimerEvent) {
        // Snapshot the batch first so a listener may register or remove
        // listeners without holding the map entry.
        let batch: Vec<Listener> = match self.listeners.get(&event.kind) {
            Some(entry) => entry.iter().map(|(_, listener)| Arc::clone(listener)).collect(),
            None => return,
        };
        for listener in batch {
            listener(event);
        }
    }
}
