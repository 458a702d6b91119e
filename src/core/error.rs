use serde::Serialize;
use thiserror::Error;

/// The five protocol error kinds defined by JSON-RPC 2.0.
///
/// Each kind carries a fixed code and a fixed wire message. Anything a handler
/// reports beyond these is logged and collapsed into `Internal` at the dispatch
/// boundary so internal detail never reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("Parse error")]
    Parse,
    #[error("Invalid Request")]
    InvalidRequest,
    #[error("Method not found")]
    MethodNotFound,
    #[error("Invalid params")]
    InvalidParams,
    #[error("Internal error")]
    Internal,
}

impl RpcError {
    pub const fn code(&self) -> i64 {
        match self {
            RpcError::Parse => -32700,
            RpcError::InvalidRequest => -32600,
            RpcError::MethodNotFound => -32601,
            RpcError::InvalidParams => -32602,
            RpcError::Internal => -32603,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            RpcError::Parse => "Parse error",
            RpcError::InvalidRequest => "Invalid Request",
            RpcError::MethodNotFound => "Method not found",
            RpcError::InvalidParams => "Invalid params",
            RpcError::Internal => "Internal error",
        }
    }

    /// Wire form of this error, built exactly once at the dispatch boundary.
    pub fn to_object(&self) -> ErrorObject {
        ErrorObject {
            code: self.code(),
            message: self.message(),
        }
    }

    /// Short tag for logs and metrics labels.
    pub const fn kind(&self) -> &'static str {
        match self {
            RpcError::Parse => "parse",
            RpcError::InvalidRequest => "invalid_request",
            RpcError::MethodNotFound => "method_not_found",
            RpcError::InvalidParams => "invalid_params",
            RpcError::Internal => "internal",
        }
    }
}

/// The `error` member of an error envelope: code plus fixed message, nothing
/// else.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorObject {
    pub code: i64,
    pub message: &'static str,
}
