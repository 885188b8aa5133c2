use crate::service::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Status carried by every failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcStatus {
    BadRequest,
    NotFound,
    ValidationFailed,
    PersistenceError,
    Internal,
    Unavailable,
}

impl RpcStatus {
    /// The HTTP-style code transports put on the wire next to the status.
    pub fn code(&self) -> u16 {
        match self {
            RpcStatus::BadRequest => 400,
            RpcStatus::NotFound => 404,
            RpcStatus::ValidationFailed => 422,
            RpcStatus::PersistenceError | RpcStatus::Internal => 500,
            RpcStatus::Unavailable => 503,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcStatus::BadRequest => "BAD_REQUEST",
            RpcStatus::NotFound => "NOT_FOUND",
            RpcStatus::ValidationFailed => "VALIDATION_FAILED",
            RpcStatus::PersistenceError => "PERSISTENCE_ERROR",
            RpcStatus::Internal => "INTERNAL",
            RpcStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl Display for RpcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one error shape that crosses the command boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status}: {message}")]
pub struct RpcError {
    pub status: RpcStatus,
    pub message: String,
}

impl RpcError {
    pub fn new(status: RpcStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::BadRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcStatus::Internal, message)
    }
}

impl From<OrderError> for RpcError {
    fn from(e: OrderError) -> Self {
        let status = match &e {
            OrderError::NotFound(_) => RpcStatus::NotFound,
            OrderError::ValidationFailed(_) => RpcStatus::ValidationFailed,
            OrderError::Persistence(_) => RpcStatus::PersistenceError,
            OrderError::InvalidRequest(_) => RpcStatus::BadRequest,
        };
        Self::new(status, e.to_string())
    }
}
