use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PointId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Conflict,
    Validation,
    Unavailable,
    Internal,
}

/// Rejection returned by a trip point persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{operation} rejected ({code:?}): {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    /// The call that failed: `fetch`, `create`, `update` or `delete`.
    pub operation: String,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn not_found(operation: impl Into<String>, id: PointId) -> Self {
        Self::new(ErrorCode::NotFound, operation, format!("trip point {id} does not exist"))
    }

    pub fn unavailable(operation: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, operation, "service unavailable")
    }

    /// Whether the same call may succeed if simply repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self.code, ErrorCode::Unavailable | ErrorCode::Internal)
    }
}
