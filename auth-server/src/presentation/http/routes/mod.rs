use axum::Router;

use crate::presentation::AppState;

pub mod account;

pub fn router(api_prefix: &str) -> Router<AppState> {
    Router::new().nest(api_prefix, account::router())
}
