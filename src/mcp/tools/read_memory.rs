// read_memory MCP tool implementation
// Recalls stored rules ranked by lexical overlap with the query

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::memory::{MemoryHit, MemoryStore};

const DEFAULT_TOP_K: usize = 5;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Request parameters for the read_memory tool.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ReadMemoryRequest {
    /// Free-text query
    pub query: String,
    /// Maximum number of results
    #[serde(default = "default_top_k", alias = "topK")]
    pub top_k: usize,
}

/// Response from the read_memory tool: hits, best first.
pub type ReadMemoryResponse = Vec<MemoryHit>;

pub fn handle(memory: &MemoryStore, request: ReadMemoryRequest) -> ReadMemoryResponse {
    memory.search(&request.query, request.top_k)
}
