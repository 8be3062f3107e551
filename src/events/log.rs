use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use super::event::Event;

/// Events retained when no capacity is configured.
pub const DEFAULT_MAX_EVENTS: usize = 1000;

/// Shared, append-only campaign event log.
///
/// Events are prepended so iteration order is newest-first. Once `capacity`
/// events are held the oldest are dropped. Cloning the log clones the handle,
/// not the events.
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Arc<RwLock<VecDeque<Event>>>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_EVENTS)
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log retaining at most `capacity` events (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Prepend an event and return a copy of it.
    pub fn push(&self, event: Event) -> Event {
        tracing::debug!(
            agent = %event.agent,
            event_type = %event.event_type,
            "{}",
            event.message
        );
        let mut events = match self.inner.write() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push_front(event.clone());
        events.truncate(self.capacity);
        event
    }

    /// Copy of all events, newest first.
    pub fn snapshot(&self) -> Vec<Event> {
        match self.inner.read() {
            Ok(events) => events.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
