use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use serde::Serialize;

use super::AppState;

pub mod app_error;
pub mod binder;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;

pub fn router(state: AppState, api_prefix: &str) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(api_prefix))
        .layer(DefaultBodyLimit::max(state.body_limit_bytes))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
