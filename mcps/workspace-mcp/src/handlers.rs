//! Tool handlers
//!
//! Each handler runs one accessor operation and shapes its outcome into a
//! `CallToolResult`. Workspace failures become tool-level error results with
//! an `Error: ` prefix; only serialization faults surface as `McpError`.

use mcp_common::{json_success, text_error, text_success, CallToolResult, McpResult};

use crate::accessor::FileAccessor;
use crate::params::{ListFilesParams, ReadFileParams, WriteFileParams};
use crate::types::WorkspaceError;

fn failure(tool: &str, err: WorkspaceError) -> CallToolResult {
    tracing::warn!(tool, kind = err.kind(), "{}", err);
    text_error(err)
}

pub async fn read_file(accessor: &FileAccessor, params: ReadFileParams) -> McpResult<CallToolResult> {
    tracing::debug!(tool = "read_file", path = %params.file_path, "tool call");

    match accessor.read(&params.file_path).await {
        Ok(content) => Ok(text_success(content)),
        Err(e) => Ok(failure("read_file", e)),
    }
}

pub async fn write_file(
    accessor: &FileAccessor,
    params: WriteFileParams,
) -> McpResult<CallToolResult> {
    tracing::debug!(
        tool = "write_file",
        path = %params.file_path,
        bytes = params.content.len(),
        "tool call"
    );

    match accessor.write(&params.file_path, &params.content).await {
        Ok(confirmation) => Ok(text_success(format!(
            "File written successfully: {}",
            confirmation.path
        ))),
        Err(e) => Ok(failure("write_file", e)),
    }
}

pub async fn list_files(
    accessor: &FileAccessor,
    params: ListFilesParams,
) -> McpResult<CallToolResult> {
    tracing::debug!(tool = "list_files", path = %params.directory_path, "tool call");

    match accessor.list(&params.directory_path).await {
        Ok(entries) => json_success(&entries),
        Err(e) => Ok(failure("list_files", e)),
    }
}

pub async fn get_workspace_info(accessor: &FileAccessor) -> McpResult<CallToolResult> {
    tracing::debug!(tool = "get_workspace_info", "tool call");

    match accessor.workspace_info().await {
        Ok(info) => json_success(&info),
        Err(e) => Ok(failure("get_workspace_info", e)),
    }
}
