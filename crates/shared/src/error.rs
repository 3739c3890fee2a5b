use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback shown when a failed response carries no usable `detail`.
pub const GENERIC_API_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Conflict,
    Validation,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::Validation,
            500..=599 => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

/// A request that reached the capability service and was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?} ({status}): {detail}")]
pub struct ApiException {
    pub status: u16,
    pub code: ErrorCode,
    pub detail: String,
}

impl ApiException {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            code: ErrorCode::from_status(status),
            detail: detail.into(),
        }
    }
}
