//! Parameter types for workspace MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    #[schemars(description = "Relative path to the file within the workspace")]
    pub file_path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    #[schemars(description = "Relative path to the file within the workspace")]
    pub file_path: String,

    #[schemars(description = "Content to write to the file")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListFilesParams {
    #[schemars(description = "Relative path to the directory within the workspace (default: '.')")]
    #[serde(default = "default_directory")]
    pub directory_path: String,
}

fn default_directory() -> String {
    ".".to_string()
}

impl Default for ListFilesParams {
    fn default() -> Self {
        Self {
            directory_path: default_directory(),
        }
    }
}
