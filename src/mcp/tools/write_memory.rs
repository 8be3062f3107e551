// write_memory MCP tool implementation
// Stores a learned rule in long-term memory if the write-gate admits it

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::memory::MemoryStore;

/// Request parameters for the write_memory tool.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WriteMemoryRequest {
    /// The rule or observation to remember
    pub content: String,
    /// One of: hook, persona, platform, performance, general
    pub category: String,
    /// Supporting data; a numeric `rating` below the gate minimum is rejected
    #[serde(default)]
    pub evidence: Option<Value>,
}

/// Response from the write_memory tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WriteMemoryResponse {
    /// Item admitted and stored
    Stored { id: String },
    /// Item turned away by the write-gate
    Rejected { reason: String },
}

pub fn handle(memory: &MemoryStore, request: WriteMemoryRequest) -> WriteMemoryResponse {
    match memory.write(&request.content, &request.category, request.evidence) {
        Ok(item) => WriteMemoryResponse::Stored { id: item.id },
        Err(reason) => WriteMemoryResponse::Rejected {
            reason: reason.to_string(),
        },
    }
}
