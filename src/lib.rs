//! Genesis: campaign automation core.
//!
//! A persona-driven creative pipeline. The [`orchestrator`] sequences a
//! campaign through platform policy lookup, workflow construction and
//! generation, charging every step to the [`budget`] ledger. The same state is
//! exposed to a dashboard over HTTP ([`api`]), to chat users through run cards
//! ([`commands`]) and to agents through a tool server ([`mcp`]).

pub mod api;
pub mod app;
pub mod artifacts;
pub mod budget;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod generation;
pub mod mcp;
pub mod memory;
pub mod orchestrator;
pub mod policy;
pub mod workflow;

pub use app::Genesis;
pub use crate::config::GenesisConfig;
pub use error::{GenesisError, GenesisResult};
