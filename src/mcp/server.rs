use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::tools::{get_cfo_audit, read_memory, write_memory};
use crate::budget::SharedBudgetTracker;
use crate::error::{GenesisError, GenesisResult};
use crate::memory::MemoryStore;

/// Genesis tool server: long-term memory and the CFO audit.
#[derive(Clone)]
pub struct GenesisMcpServer {
    memory: MemoryStore,
    budget: SharedBudgetTracker,
    tool_router: ToolRouter<GenesisMcpServer>,
}

impl GenesisMcpServer {
    pub fn new(memory: MemoryStore, budget: SharedBudgetTracker) -> Self {
        Self {
            memory,
            budget,
            tool_router: Self::tool_router(),
        }
    }

    /// Invoke a tool by name with JSON arguments.
    pub fn dispatch(&self, tool: &str, arguments: Value) -> GenesisResult<Value> {
        tracing::debug!(tool, "Dispatching tool call");
        let response = match tool {
            "write_memory" => {
                serde_json::to_value(write_memory::handle(&self.memory, parse_args(tool, arguments)?))?
            }
            "read_memory" => {
                serde_json::to_value(read_memory::handle(&self.memory, parse_args(tool, arguments)?))?
            }
            "get_cfo_audit" => serde_json::to_value(get_cfo_audit::handle(&self.budget))?,
            _ => return Err(GenesisError::ToolNotFound(tool.to_string())),
        };
        Ok(response)
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> GenesisResult<T> {
    serde_json::from_value(arguments).map_err(|e| GenesisError::InvalidToolArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| to_mcp_error(GenesisError::Json(e)))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Map a domain error onto the protocol error space.
pub fn to_mcp_error(err: GenesisError) -> McpError {
    if err.is_invalid_input() || err.is_not_found() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

#[tool_router]
impl GenesisMcpServer {
    #[tool(
        description = "Store a learned campaign rule in long-term memory. Items pass a write-gate: content of at least 12 characters, a category of hook, persona, platform, performance or general, and an evidence rating of 4 or more when one is given."
    )]
    async fn write_memory(
        &self,
        Parameters(request): Parameters<write_memory::WriteMemoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&write_memory::handle(&self.memory, request))
    }

    #[tool(description = "Recall stored campaign rules most relevant to a query.")]
    async fn read_memory(
        &self,
        Parameters(request): Parameters<read_memory::ReadMemoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&read_memory::handle(&self.memory, request))
    }

    #[tool(
        description = "Audit campaign finances: effective hourly rate, health status and a recommendation."
    )]
    async fn get_cfo_audit(&self) -> Result<CallToolResult, McpError> {
        json_result(&get_cfo_audit::handle(&self.budget))
    }
}

#[tool_handler]
impl ServerHandler for GenesisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Genesis campaign tools. Use 'read_memory' to recall platform and persona rules before drafting, 'write_memory' to keep rules that performed well, and 'get_cfo_audit' to check whether the campaign is earning above its baseline hourly rate."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetConfig;
    use crate::memory::MemoryConfig;
    use serde_json::json;

    fn server() -> GenesisMcpServer {
        GenesisMcpServer::new(
            MemoryStore::seeded(MemoryConfig::default()),
            SharedBudgetTracker::new(BudgetConfig::default()),
        )
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let err = server().dispatch("delete_everything", json!({})).unwrap_err();
        assert!(matches!(err, GenesisError::ToolNotFound(_)));
        assert_eq!(err.to_string(), "Tool delete_everything not found");
    }

    #[test]
    fn test_dispatch_write_then_read() {
        let server = server();
        let stored = server
            .dispatch(
                "write_memory",
                json!({
                    "content": "Streamer clips convert best on Fridays.",
                    "category": "performance",
                    "evidence": { "rating": 5 }
                }),
            )
            .unwrap();
        assert_eq!(stored["status"], "stored");

        let hits = server
            .dispatch("read_memory", json!({ "query": "streamer fridays", "top_k": 3 }))
            .unwrap();
        assert_eq!(hits[0]["content"], "Streamer clips convert best on Fridays.");
        assert_eq!(hits[0]["score"], 1.0);
    }

    #[test]
    fn test_dispatch_rejected_write() {
        let stored = server()
            .dispatch(
                "write_memory",
                json!({
                    "content": "Streamer clips convert best on Fridays.",
                    "category": "performance",
                    "evidence": { "rating": 1 }
                }),
            )
            .unwrap();
        assert_eq!(stored["status"], "rejected");
    }

    #[test]
    fn test_dispatch_invalid_arguments() {
        let err = server()
            .dispatch("write_memory", json!({ "category": "hook" }))
            .unwrap_err();
        assert!(matches!(err, GenesisError::InvalidToolArguments { ref tool, .. } if tool == "write_memory"));
    }

    #[test]
    fn test_dispatch_cfo_audit_ignores_arguments() {
        let audit = server().dispatch("get_cfo_audit", Value::Null).unwrap();
        assert_eq!(audit["status"], "warning");
        assert_eq!(
            audit["recommendation"],
            "Degrade model tier to DeepSeek-Lite or reduce generation variants."
        );
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("get_cfo_audit"));
    }
}
