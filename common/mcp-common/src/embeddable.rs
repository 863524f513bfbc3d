//! In-process tool dispatch
//!
//! [`EmbeddableMcp`] lets a host call a server's tools by name with a JSON
//! argument object, without going through a transport. It is also the
//! easiest way to drive a server from tests.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let tools = server.list_tools();
//! let result = server
//!     .call_tool("read_file", serde_json::json!({ "file_path": "notes.md" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Errors raised while dispatching a tool call in-process
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not decode into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// Protocol-level fault raised by the tool itself
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// A server whose tools can be listed and invoked directly
///
/// Servers built on `#[tool_router]` implement `list_tools` by delegating to
/// their `ToolRouter` and `call_tool` with a match on the tool name.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used to identify the server in host configuration
    fn server_name(&self) -> &str;

    /// Tools with their names, descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Invoke `name` with a JSON object of arguments
    ///
    /// Tool-level failures come back as `Ok` results with `is_error` set;
    /// `Err` is reserved for unknown tools, undecodable arguments and
    /// protocol faults.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    fn server_version(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::text_success;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct EchoParams {
        text: String,
    }

    struct EchoServer;

    #[async_trait]
    impl EmbeddableMcp for EchoServer {
        fn server_name(&self) -> &str {
            "echo"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
            match name {
                "echo" => {
                    let params: EchoParams = serde_json::from_value(params)?;
                    Ok(text_success(params.text))
                }
                _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let server = EchoServer;
        assert_eq!(server.server_name(), "echo");
        assert!(server.server_description().is_none());
        assert!(server.server_version().is_none());
    }

    #[tokio::test]
    async fn test_call_known_tool() {
        let result = EchoServer
            .call_tool("echo", serde_json::json!({ "text": "hi" }))
            .await
            .unwrap();
        assert_eq!(crate::result::result_text(&result), "hi");
    }

    #[tokio::test]
    async fn test_call_with_bad_params() {
        let result = EchoServer.call_tool("echo", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let result = EchoServer.call_tool("unknown", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }
}
