//! Workspace MCP Library
//!
//! File access confined to a single workspace directory, exposed as MCP
//! tools: `read_file`, `write_file`, `list_files` and `get_workspace_info`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use workspace_mcp::{Config, WorkspaceMcpServer};
//!
//! let server = WorkspaceMcpServer::new(&Config::load()?)?;
//! let result = server
//!     .call_tool("list_files", serde_json::json!({ "directory_path": "." }))
//!     .await?;
//! ```
//!
//! The sandboxing itself lives in [`sandbox`]; [`accessor::FileAccessor`]
//! can be used directly when no MCP layer is wanted.

pub mod accessor;
pub mod config;
pub mod handlers;
pub mod params;
pub mod sandbox;
pub mod server;
pub mod types;

pub use accessor::FileAccessor;
pub use config::Config;
pub use sandbox::{ResolvedPath, Sandbox};
pub use server::WorkspaceMcpServer;
pub use types::{
    DirectoryEntry, EntryKind, WorkspaceError, WorkspaceInfo, WorkspaceResult, WriteConfirmation,
};

pub use params::*;
