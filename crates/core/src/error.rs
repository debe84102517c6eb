//! Error types for the Seedcall domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; fatality is decided by the
//! caller: template and model errors abort a run, config and tool errors
//! degrade gracefully.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Seedcall operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model endpoint errors (fatal for the run) ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Template errors (fatal for the run) ---
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    // --- Tool errors (recovered into the conversation) ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors (non-fatal) ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to the completion endpoint.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by endpoint, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures loading or rendering the prompt template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to compile template {path}: {reason}")]
    Compile { path: PathBuf, reason: String },

    #[error("Failed to render prompt: {0}")]
    Render(String),
}

/// Failures executing a parsed tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_function_carries_name() {
        let err = ToolError::UnknownFunction("get_weather".into());
        assert_eq!(err.to_string(), "Unknown function 'get_weather'");
    }

    #[test]
    fn model_error_displays_status() {
        let err = Error::Model(ModelError::ApiError {
            status_code: 503,
            message: "upstream unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[test]
    fn template_not_found_displays_path() {
        let err = Error::Template(TemplateError::NotFound {
            path: PathBuf::from("seed_oss_chat_template.jinja"),
        });
        assert!(err.to_string().contains("seed_oss_chat_template.jinja"));
    }
}
