use utoipa::OpenApi;

use crate::domain::error::{DomainError, ErrorKind};
use crate::domain::token::TokenPair;
use crate::presentation::http::app_error::{ErrorBody, InvalidArgument};
use crate::presentation::http::handlers::account::{MessageDto, SignUpDto, SignUpResponseDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::account::sign_up,
        crate::presentation::http::handlers::account::me,
        crate::presentation::http::handlers::account::sign_in,
        crate::presentation::http::handlers::account::sign_out,
        crate::presentation::http::handlers::account::token,
        crate::presentation::http::handlers::account::image,
        crate::presentation::http::handlers::account::delete_image,
        crate::presentation::http::handlers::account::details
    ),
    components(
        schemas(
            SignUpDto,
            SignUpResponseDto,
            TokenPair,
            MessageDto,
            ErrorBody,
            DomainError,
            ErrorKind,
            InvalidArgument
        )
    ),
    tags(
        (name = "account", description = "Account endpoints")
    )
)]
pub struct ApiDoc;
