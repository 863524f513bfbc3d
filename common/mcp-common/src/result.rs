//! Helpers for building `CallToolResult` values

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Result type returned by tool methods
pub type McpResult<T> = Result<T, McpError>;

/// Prefix carried by every tool-level failure message
pub const ERROR_PREFIX: &str = "Error: ";

/// Serialize `data` as pretty JSON into a single text content item
///
/// Fails with an internal MCP error only if serialization itself fails.
pub fn json_success<T: Serialize>(data: &T) -> McpResult<CallToolResult> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Plain text success
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Tool-level failure: `is_error` is set and the message is prefixed with
/// [`ERROR_PREFIX`]
///
/// Unlike an `McpError`, this reaches the caller as an ordinary tool result,
/// so the model on the other side can read the message and react to it.
pub fn text_error(message: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("{}{}", ERROR_PREFIX, message))])
}

/// Concatenate the text content items of a result, one per line
///
/// Non-text content is skipped.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            rmcp::model::RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Entry {
        name: String,
        size: u64,
    }

    #[test]
    fn test_json_success() {
        let data = Entry {
            name: "notes.md".to_string(),
            size: 42,
        };
        let result = json_success(&data).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(parsed["name"], "notes.md");
        assert_eq!(parsed["size"], 42);
    }

    #[test]
    fn test_text_success() {
        let result = text_success("done");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "done");
    }

    #[test]
    fn test_text_error_prefixed() {
        let result = text_error("File not found: a.txt");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "Error: File not found: a.txt");
    }
}
