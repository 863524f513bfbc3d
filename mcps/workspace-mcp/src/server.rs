//! MCP Server implementation for workspace file access
//!
//! Exposes the four workspace tools through rmcp's tool router and through
//! [`EmbeddableMcp`] for in-process callers. Handler implementations are in
//! the handlers module.

use mcp_common::{async_trait, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::accessor::FileAccessor;
use crate::config::Config;
use crate::handlers;
use crate::params::{ListFilesParams, ReadFileParams, WriteFileParams};
use crate::sandbox::Sandbox;
use crate::types::WorkspaceResult;

const INSTRUCTIONS: &str = "Workspace file manager. Reads, writes and lists files inside a single \
     workspace directory. All paths are relative to the workspace root; paths that \
     leave it are rejected. Use get_workspace_info to see which directory is served.";

/// The Workspace MCP Server
#[derive(Clone)]
pub struct WorkspaceMcpServer {
    accessor: FileAccessor,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl WorkspaceMcpServer {
    /// Create a server from loaded configuration
    ///
    /// Fails with a configuration error when no usable workspace root is set.
    pub fn new(config: &Config) -> WorkspaceResult<Self> {
        let sandbox = Sandbox::new(config.workspace_root()?)?;
        Ok(Self::with_accessor(FileAccessor::new(sandbox, config.debug)))
    }

    pub fn with_accessor(accessor: FileAccessor) -> Self {
        Self {
            accessor,
            tool_router: Self::tool_router(),
        }
    }

    pub fn accessor(&self) -> &FileAccessor {
        &self.accessor
    }

    #[tool(description = "Read a file from the workspace. Returns the full file content as text.")]
    async fn read_file(
        &self,
        Parameters(params): Parameters<ReadFileParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::read_file(&self.accessor, params).await
    }

    #[tool(
        description = "Write content to a file in the workspace. Creates missing parent directories and replaces any existing file."
    )]
    async fn write_file(
        &self,
        Parameters(params): Parameters<WriteFileParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::write_file(&self.accessor, params).await
    }

    #[tool(
        description = "List files in a directory within the workspace. Returns the direct children with name, type (file or directory) and relative path."
    )]
    async fn list_files(
        &self,
        Parameters(params): Parameters<ListFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_files(&self.accessor, params).await
    }

    #[tool(
        description = "Get information about the workspace: root directory, whether it exists, creation and modification times."
    )]
    async fn get_workspace_info(&self) -> Result<CallToolResult, McpError> {
        handlers::get_workspace_info(&self.accessor).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for WorkspaceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for WorkspaceMcpServer {
    fn server_name(&self) -> &str {
        "workspace"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "read_file" => {
                let params: ReadFileParams = serde_json::from_value(params)?;
                self.read_file(Parameters(params)).await.map_err(Into::into)
            }

            "write_file" => {
                let params: WriteFileParams = serde_json::from_value(params)?;
                self.write_file(Parameters(params)).await.map_err(Into::into)
            }

            "list_files" => {
                let params: ListFilesParams = serde_json::from_value(params)?;
                self.list_files(Parameters(params)).await.map_err(Into::into)
            }

            "get_workspace_info" => self.get_workspace_info().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkspaceError;
    use mcp_common::result_text;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn server() -> (TempDir, WorkspaceMcpServer) {
        let dir = TempDir::new().unwrap();
        let config = Config {
            workspace: Some(dir.path().to_path_buf()),
            debug: false,
        };
        let server = WorkspaceMcpServer::new(&config).unwrap();
        (dir, server)
    }

    #[test]
    fn test_new_requires_workspace() {
        let result = WorkspaceMcpServer::new(&Config::default());
        assert!(matches!(result, Err(WorkspaceError::Configuration(_))));

        let config = Config {
            workspace: Some(PathBuf::from("relative/dir")),
            debug: false,
        };
        let result = WorkspaceMcpServer::new(&config);
        assert!(matches!(result, Err(WorkspaceError::Configuration(_))));
    }

    #[test]
    fn test_embeddable_list_tools() {
        let (_dir, server) = server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 4);

        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["get_workspace_info", "list_files", "read_file", "write_file"]
        );
    }

    #[tokio::test]
    async fn test_embeddable_write_read_list() {
        let (_dir, server) = server();

        let result = server
            .call_tool(
                "write_file",
                serde_json::json!({ "file_path": "notes/today.md", "content": "line 1\nline 2\n" }),
            )
            .await
            .unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let result = server
            .call_tool("read_file", serde_json::json!({ "file_path": "notes/today.md" }))
            .await
            .unwrap();
        assert_eq!(result_text(&result), "line 1\nline 2\n");

        let result = server
            .call_tool("list_files", serde_json::json!({}))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{ "name": "notes", "type": "directory", "path": "notes" }])
        );
    }

    #[tokio::test]
    async fn test_embeddable_missing_file_is_error_result() {
        let (_dir, server) = server();
        let result = server
            .call_tool("read_file", serde_json::json!({ "file_path": "absent.txt" }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "Error: File not found: absent.txt");
    }

    #[tokio::test]
    async fn test_embeddable_bad_params() {
        let (_dir, server) = server();
        let result = server
            .call_tool("read_file", serde_json::json!({ "path": "a.txt" }))
            .await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let (_dir, server) = server();
        let result = server
            .call_tool("delete_file", serde_json::json!({ "file_path": "a.txt" }))
            .await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }
}
