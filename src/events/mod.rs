//! Campaign event log.

mod event;
mod log;

pub use event::{agents, Event, EventType};
pub use log::{EventLog, DEFAULT_MAX_EVENTS};
