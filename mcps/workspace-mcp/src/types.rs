//! Type definitions for workspace MCP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Direct child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Path relative to the workspace root
    pub path: String,
}

/// Confirmation returned by a successful write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteConfirmation {
    /// The path exactly as the caller supplied it
    pub path: String,
    pub bytes_written: usize,
}

/// Snapshot of the workspace root, taken on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(rename = "workspace_directory")]
    pub root: String,
    pub debug_mode: bool,
    #[serde(rename = "directory_exists")]
    pub exists: bool,
    /// `None` where the filesystem does not record birth time
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: DateTime<Utc>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Access denied: {0} is outside the workspace")]
    Boundary(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WorkspaceError {
    /// Classify an I/O failure on `path` by its error kind
    pub fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::NotADirectory => Self::NotADirectory(path),
            io::ErrorKind::IsADirectory => Self::IsADirectory(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// Short machine-friendly name of the failure class, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boundary(_) => "boundary",
            Self::InvalidPath(_) => "invalid_path",
            Self::NotFound(_) => "not_found",
            Self::NotADirectory(_) => "not_a_directory",
            Self::IsADirectory(_) => "is_a_directory",
            Self::Io { .. } => "io",
            Self::Configuration(_) => "configuration",
        }
    }
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_kind() {
        let err = WorkspaceError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, WorkspaceError::NotFound(ref p) if p == "a.txt"));

        let err = WorkspaceError::from_io("d", io::Error::from(io::ErrorKind::IsADirectory));
        assert!(matches!(err, WorkspaceError::IsADirectory(_)));

        let err = WorkspaceError::from_io("f", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().starts_with("IO error on f:"));
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = DirectoryEntry {
            name: "b".to_string(),
            kind: EntryKind::Directory,
            path: "sub/b".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "b", "type": "directory", "path": "sub/b" })
        );
    }
}
