use axum::{
    Router,
    routing::{get, post, put},
};

use crate::presentation::AppState;
use crate::presentation::http::handlers::account::{
    delete_image, details, image, me, sign_in, sign_out, sign_up, token,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/token", post(token))
        .route("/image", post(image).delete(delete_image))
        .route("/details", put(details))
}
