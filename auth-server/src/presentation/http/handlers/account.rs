use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::token::TokenPair;
use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::binder::empty_string_as_none;
use crate::presentation::http::extract::ValidatedBody;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpDto {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(required, email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(required, length(min = 6, max = 30))]
    pub password: Option<String>,
}

impl SignUpDto {
    fn into_user(self) -> Result<User, DomainError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok(User::with_credentials(email, password)),
            _ => Err(DomainError::internal_server_error()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignUpResponseDto {
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

fn message(text: &str) -> Json<MessageDto> {
    Json(MessageDto {
        message: text.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/account/sign-up",
    tag = "account",
    request_body = SignUpDto,
    responses(
        (status = 201, description = "User created, token pair issued", body = SignUpResponseDto),
        (status = 400, description = "Invalid request parameters", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody),
        (status = 413, description = "Payload too large", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedBody(dto): ValidatedBody<SignUpDto>,
) -> AppResult<(StatusCode, Json<SignUpResponseDto>)> {
    let user = dto.into_user()?;

    let user = state
        .user_service
        .sign_up(user)
        .await
        .inspect_err(|err| warn!(error = %err, kind = %err.kind(), "failed to sign up user"))?;

    let tokens = state
        .token_service
        .new_pair_from_user(&user, "")
        .await
        .inspect_err(|err| {
            warn!(error = %err, uid = %user.uid, "failed to create tokens for user")
        })?;

    Ok((StatusCode::CREATED, Json(SignUpResponseDto { tokens })))
}

#[utoipa::path(get, path = "/api/account/me", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn me() -> Json<MessageDto> {
    message("It's me")
}

#[utoipa::path(post, path = "/api/account/sign-in", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn sign_in() -> Json<MessageDto> {
    message("It's sign in")
}

#[utoipa::path(post, path = "/api/account/sign-out", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn sign_out() -> Json<MessageDto> {
    message("It's sign out")
}

#[utoipa::path(post, path = "/api/account/token", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn token() -> Json<MessageDto> {
    message("It's token")
}

#[utoipa::path(post, path = "/api/account/image", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn image() -> Json<MessageDto> {
    message("It's image")
}

#[utoipa::path(delete, path = "/api/account/image", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn delete_image() -> Json<MessageDto> {
    message("It's delete image")
}

#[utoipa::path(put, path = "/api/account/details", tag = "account",
    responses((status = 200, description = "Placeholder response", body = MessageDto)))]
pub async fn details() -> Json<MessageDto> {
    message("It's details")
}
