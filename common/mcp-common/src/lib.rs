//! MCP Common - shared helpers for the MCP servers in this workspace
//!
//! - **Initialization**: [`init_tracing`] sets up stderr logging
//! - **Results**: [`json_success`], [`text_success`] and [`text_error`] build
//!   `CallToolResult` values
//! - **Embeddable**: [`EmbeddableMcp`] dispatches tools by name in-process

pub mod embeddable;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use init::init_tracing;
pub use result::{json_success, result_text, text_error, text_success, McpResult, ERROR_PREFIX};

pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
