//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// Closed classification of tool failures surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A precondition was violated or the arguments were malformed.
    InvalidArgument,

    /// The requested tool is not in the catalog.
    MethodNotFound,

    /// Any other failure while evaluating a tool.
    InternalError,
}

impl ErrorKind {
    /// JSON-RPC error code for this kind.
    pub fn json_rpc_code(self) -> i32 {
        match self {
            Self::InvalidArgument => ErrorCode::INVALID_PARAMS.0,
            Self::MethodNotFound => ErrorCode::METHOD_NOT_FOUND.0,
            Self::InternalError => ErrorCode::INTERNAL_ERROR.0,
        }
    }

    /// HTTP status code used by the plain REST endpoints.
    pub fn http_status(self) -> u16 {
        match self {
            Self::InvalidArgument | Self::MethodNotFound => 400,
            Self::InternalError => 500,
        }
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided, or a precondition failed.
    #[error("{0}")]
    InvalidArgument(String),

    /// An unexpected failure during evaluation.
    #[error("Calculator error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The kind reported to clients.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::MethodNotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::new(ErrorCode(err.kind().json_rpc_code()), err.to_string(), None)
    }
}
