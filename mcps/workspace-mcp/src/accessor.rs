//! Sandboxed file operations
//!
//! Every operation resolves and confines the caller's path before touching
//! the filesystem and reports failures as [`WorkspaceError`] values.

use chrono::{DateTime, Utc};
use tokio::fs;

use crate::sandbox::{ResolvedPath, Sandbox};
use crate::types::{
    DirectoryEntry, EntryKind, WorkspaceError, WorkspaceInfo, WorkspaceResult, WriteConfirmation,
};

/// Read, write and list files under a fixed workspace root
#[derive(Debug, Clone)]
pub struct FileAccessor {
    sandbox: Sandbox,
    debug: bool,
}

impl FileAccessor {
    pub fn new(sandbox: Sandbox, debug: bool) -> Self {
        Self { sandbox, debug }
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    async fn checked(&self, requested: &str) -> WorkspaceResult<ResolvedPath> {
        let resolved = self.sandbox.resolve(requested)?;
        self.sandbox.confine(&resolved).await?;
        Ok(resolved)
    }

    /// Full content of a file, decoded as UTF-8
    ///
    /// Invalid byte sequences are replaced with U+FFFD rather than failing.
    pub async fn read(&self, requested: &str) -> WorkspaceResult<String> {
        let resolved = self.checked(requested).await?;
        let display = resolved.display_relative();

        let metadata = fs::metadata(resolved.absolute())
            .await
            .map_err(|e| WorkspaceError::from_io(&display, e))?;
        if metadata.is_dir() {
            return Err(WorkspaceError::IsADirectory(display));
        }

        let bytes = fs::read(resolved.absolute())
            .await
            .map_err(|e| WorkspaceError::from_io(display, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Create or replace a file, creating missing parent directories
    ///
    /// The content is written in place; a crash part-way through can leave a
    /// truncated file behind.
    pub async fn write(&self, requested: &str, content: &str) -> WorkspaceResult<WriteConfirmation> {
        let resolved = self.checked(requested).await?;
        let display = resolved.display_relative();

        if resolved.is_root() {
            return Err(WorkspaceError::IsADirectory(display));
        }

        if let Some(parent) = resolved.absolute().parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| WorkspaceError::from_io(&display, e))?;
        }

        // A missing target is the usual case; any other stat failure
        // resurfaces from the write below.
        if let Ok(metadata) = fs::metadata(resolved.absolute()).await {
            if metadata.is_dir() {
                return Err(WorkspaceError::IsADirectory(display));
            }
        }

        fs::write(resolved.absolute(), content.as_bytes())
            .await
            .map_err(|e| WorkspaceError::from_io(display, e))?;

        Ok(WriteConfirmation {
            path: requested.to_string(),
            bytes_written: content.len(),
        })
    }

    /// Direct children of a directory, sorted by name
    ///
    /// Symbolic links are reported by their own type and never followed, so
    /// a link to a directory is listed as a file.
    pub async fn list(&self, requested: &str) -> WorkspaceResult<Vec<DirectoryEntry>> {
        let resolved = self.checked(requested).await?;
        let display = resolved.display_relative();

        let metadata = fs::metadata(resolved.absolute())
            .await
            .map_err(|e| WorkspaceError::from_io(&display, e))?;
        if !metadata.is_dir() {
            return Err(WorkspaceError::NotADirectory(display));
        }

        let mut read_dir = fs::read_dir(resolved.absolute())
            .await
            .map_err(|e| WorkspaceError::from_io(&display, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| WorkspaceError::from_io(&display, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| WorkspaceError::from_io(&display, e))?;
            let name = entry.file_name();

            entries.push(DirectoryEntry {
                name: name.to_string_lossy().into_owned(),
                kind: if file_type.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                path: resolved.child(&name),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Stat the workspace root itself
    pub async fn workspace_info(&self) -> WorkspaceResult<WorkspaceInfo> {
        let root = self.sandbox.root();
        let display = root.display().to_string();

        let metadata = fs::metadata(root)
            .await
            .map_err(|e| WorkspaceError::Io {
                path: display.clone(),
                source: e,
            })?;

        let created_at: Option<DateTime<Utc>> = metadata.created().ok().map(Into::into);
        let modified_at: DateTime<Utc> = metadata
            .modified()
            .map_err(|e| WorkspaceError::Io {
                path: display.clone(),
                source: e,
            })?
            .into();

        Ok(WorkspaceInfo {
            root: display,
            debug_mode: self.debug,
            exists: metadata.is_dir(),
            created_at,
            modified_at,
        })
    }
}
