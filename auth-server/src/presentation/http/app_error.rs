use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::error::{DomainError, ErrorKind};

/// One violated field constraint, reported back under `invalidArgs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InvalidArgument {
    pub field: String,
    pub value: String,
    pub tag: String,
    pub param: String,
}

/// Error returned by handlers and extractors.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct AppError {
    error: DomainError,
    invalid_args: Option<Vec<InvalidArgument>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn with_invalid_args(error: DomainError, invalid_args: Vec<InvalidArgument>) -> Self {
        Self {
            error,
            invalid_args: Some(invalid_args),
        }
    }

    pub fn error(&self) -> &DomainError {
        &self.error
    }

    pub fn invalid_args(&self) -> Option<&[InvalidArgument]> {
        self.invalid_args.as_deref()
    }

    pub fn status(&self) -> StatusCode {
        kind_status(self.error.kind())
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        Self {
            error,
            invalid_args: None,
        }
    }
}

pub fn kind_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Authorization => StatusCode::UNAUTHORIZED,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
    }
}

/// Status for any error crossing the transport boundary.
///
/// The source chain is searched for a [`DomainError`] (directly or inside an
/// [`AppError`]); anything else is reported as 500.
pub fn status_of(err: &(dyn StdError + 'static)) -> StatusCode {
    std::iter::successors(Some(err), |&current| current.source())
        .find_map(|current| {
            if let Some(domain) = current.downcast_ref::<DomainError>() {
                return Some(kind_status(domain.kind()));
            }
            current.downcast_ref::<AppError>().map(AppError::status)
        })
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: DomainError,
    #[serde(rename = "invalidArgs", skip_serializing_if = "Option::is_none")]
    pub invalid_args: Option<Vec<InvalidArgument>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        let body = ErrorBody {
            error: self.error,
            invalid_args: self.invalid_args,
        };

        (status, Json(body)).into_response()
    }
}
