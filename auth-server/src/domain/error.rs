use std::fmt;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Closed set of application failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Authorization,
    BadRequest,
    Conflict,
    Internal,
    NotFound,
    PayloadTooLarge,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Authorization,
        ErrorKind::BadRequest,
        ErrorKind::Conflict,
        ErrorKind::Internal,
        ErrorKind::NotFound,
        ErrorKind::PayloadTooLarge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Authorization => "AUTHORIZATION",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }

    /// Parses a wire name. Unknown names collapse to `Internal`.
    pub fn from_wire(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or(ErrorKind::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level failure: a kind plus a human readable message.
///
/// Values are built through the per-kind constructors and never mutated.
/// The HTTP status is derived from [`ErrorKind`] at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, ToSchema)]
#[error("{message}")]
pub struct DomainError {
    #[serde(rename = "type")]
    kind: ErrorKind,
    message: String,
}

impl DomainError {
    pub const INTERNAL_MESSAGE: &'static str = "Internal server error.";

    fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn authorization(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, reason.into())
    }

    pub fn bad_request(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::BadRequest,
            format!("Bad Request. Reason: {reason}"),
        )
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, reason.into())
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, reason.into())
    }

    pub fn payload_too_large(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, reason.into())
    }

    pub fn internal_server_error() -> Self {
        Self::internal(Self::INTERNAL_MESSAGE)
    }

    pub fn resource_conflict(name: &str, value: &str) -> Self {
        Self::conflict(format!(
            "resource: {name} with value: {value} already exists"
        ))
    }

    pub fn resource_not_found(name: &str, value: &str) -> Self {
        Self::not_found(format!("resource: {name} with value: {value} not found"))
    }

    pub fn body_limit_exceeded(max_bytes: usize, actual_bytes: Option<u64>) -> Self {
        let actual = actual_bytes
            .map(|bytes| bytes.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::payload_too_large(format!(
            "Max payload size of {max_bytes} exceeded. Actual payload size: {actual}"
        ))
    }
}
