//! Failure taxonomy for tool invocations.

use huddle_api::ApiError;
use thiserror::Error;

/// Everything that can go wrong while handling one tool call.
///
/// Lower layers (validators, gateway, formatters) raise these and never
/// recover; only the dispatcher's envelope boundary converts them into the
/// caller-visible text block.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Caller input rejected before any network traffic.
    #[error("{0}")]
    Validation(String),

    /// The invocation named an operation outside the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Upstream answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never reached the upstream service.
    #[error("Network error: {0}")]
    Network(String),
}

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        ToolError::Validation(message.into())
    }
}

impl From<ApiError> for ToolError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, body } => ToolError::Api { status, body },
            ApiError::Network(message) => ToolError::Network(message),
        }
    }
}
