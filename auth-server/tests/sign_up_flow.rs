use auth_server::infrastructure::settings::Settings;
use auth_server::presentation::AppState;
use auth_server::server::build_router;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn test_settings() -> Settings {
    Settings {
        http_addr: "127.0.0.1:0".to_string(),
        auth_api_url: "/v1/auth".to_string(),
        cors_origins: vec!["*".to_string()],
        log_level: "debug".to_string(),
        http_request_body_limit_bytes: 4096,
        http_concurrency_limit: 8,
        shutdown_timeout_secs: 1,
    }
}

fn test_app() -> Router {
    let settings = test_settings();
    build_router(
        AppState::in_memory(settings.http_request_body_limit_bytes),
        &settings,
    )
}

fn sign_up(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/auth/sign-up")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request must build")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be json")
}

#[tokio::test]
async fn sign_up_issues_tokens_then_rejects_duplicate_email() {
    let app = test_app();
    let payload = r#"{"email":"a@b.com","password":"longenough1"}"#;

    let first = app
        .clone()
        .oneshot(sign_up(payload))
        .await
        .expect("request must complete");
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = body_json(first).await;
    assert!(body["tokens"]["idToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["tokens"]["refreshToken"].as_str().is_some_and(|t| !t.is_empty()));

    let second = app
        .oneshot(sign_up(payload))
        .await
        .expect("request must complete");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"]["type"], "CONFLICT");
    assert!(body.get("invalidArgs").is_none());
}

#[tokio::test]
async fn unsupported_content_type_is_internal() {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/auth/sign-up")
        .header("content-type", "text/plain")
        .body(Body::from("email=a@b.com"))
        .expect("request must build");

    let resp = test_app().oneshot(req).await.expect("request must complete");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"]["type"], "INTERNAL");
}

#[tokio::test]
async fn routes_live_under_configured_prefix() {
    let req = Request::builder()
        .uri("/v1/auth/me")
        .body(Body::empty())
        .expect("request must build");
    let resp = test_app().oneshot(req).await.expect("request must complete");
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .uri("/api/account/me")
        .body(Body::empty())
        .expect("request must build");
    let resp = test_app().oneshot(req).await.expect("request must complete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let req = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .expect("request must build");
    let resp = test_app().oneshot(req).await.expect("request must complete");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");

    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .expect("request must build");
    let resp = test_app().oneshot(req).await.expect("request must complete");
    assert_eq!(resp.status(), StatusCode::OK);
}
