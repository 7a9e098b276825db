use axum::{
    body::Bytes,
    extract::{
        FromRequest, Request,
        rejection::{BytesRejection, FailedToBufferBody},
    },
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;
use crate::presentation::http::binder::{bind, decoder_for};

/// Body extractor that runs [`bind`] on the raw payload.
///
/// The size limit is enforced before the content type is looked at.
#[derive(Debug, Clone)]
pub struct ValidatedBody<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedBody<T>
where
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = header_text(req.headers(), header::CONTENT_TYPE);
        let content_length = header_text(req.headers(), header::CONTENT_LENGTH)
            .and_then(|value| value.parse::<u64>().ok());

        let raw = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
                    warn!(
                        limit = state.body_limit_bytes,
                        content_length, "request body too large"
                    );
                    DomainError::body_limit_exceeded(state.body_limit_bytes, content_length)
                }
                other => {
                    warn!(error = %other, "failed to read request body");
                    DomainError::internal_server_error()
                }
            })?;

        let decoder = decoder_for(content_type.as_deref()).map_err(|err| {
            warn!(error = %err, "rejecting request body");
            DomainError::internal_server_error()
        })?;

        bind(&decoder, &raw).map(ValidatedBody)
    }
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
