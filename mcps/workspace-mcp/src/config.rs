//! Configuration loading for workspace-mcp
//!
//! Sources, later ones overriding earlier ones:
//! 1. TOML file at `WORKSPACE_MCP_CONFIG_PATH`, or
//!    `$XDG_CONFIG_HOME/workspace-mcp/config.toml` when it exists
//! 2. Environment variables `WORKSPACE` and `DEBUG`
//!
//! A workspace root must come out of one of them; there is no default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::{WorkspaceError, WorkspaceResult};

pub const WORKSPACE_ENV: &str = "WORKSPACE";
pub const DEBUG_ENV: &str = "DEBUG";
pub const CONFIG_PATH_ENV: &str = "WORKSPACE_MCP_CONFIG_PATH";

/// Settings read at startup and fixed for the life of the process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory all file operations are confined to
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    /// Verbose diagnostics; has no effect on behaviour
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Load from the config file and the process environment
    pub fn load() -> WorkspaceResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn load_with<F>(lookup: F) -> WorkspaceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::find_config_path(&lookup) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(workspace) = lookup(WORKSPACE_ENV).filter(|v| !v.is_empty()) {
            config.workspace = Some(PathBuf::from(workspace));
        }
        if let Some(debug) = lookup(DEBUG_ENV) {
            config.debug = parse_flag(&debug);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> WorkspaceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WorkspaceError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            WorkspaceError::Configuration(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// An explicit path is used even if missing (and then fails to load);
    /// the XDG location only when the file is there
    fn find_config_path<F>(lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("workspace-mcp").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// The configured root, or a configuration error naming how to set it
    pub fn workspace_root(&self) -> WorkspaceResult<&Path> {
        self.workspace.as_deref().ok_or_else(|| {
            WorkspaceError::Configuration(format!(
                "no workspace configured; set {} or `workspace` in the config file",
                WORKSPACE_ENV
            ))
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
