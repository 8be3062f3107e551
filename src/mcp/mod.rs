//! Tool-call server.
//!
//! The same handlers back two entry points: [`GenesisMcpServer::dispatch`]
//! for JSON calls arriving over HTTP, and the rmcp tool router served over
//! stdio by `genesis mcp`.

mod server;
pub mod tools;

pub use server::{to_mcp_error, GenesisMcpServer};
