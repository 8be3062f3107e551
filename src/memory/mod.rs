//! Long-term campaign memory: a gated, in-process store of learned rules
//! recalled by lexical overlap.

mod gate;
mod store;

pub use gate::{MemoryConfig, Rejection, WriteGate, CATEGORIES};
pub use store::{MemoryHit, MemoryItem, MemoryStore};
