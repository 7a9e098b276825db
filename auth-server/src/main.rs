use anyhow::Result;
use tracing::info;

use auth_server::infrastructure::logging::init_logging;
use auth_server::infrastructure::settings::Settings;
use auth_server::presentation::AppState;
use auth_server::server::run_http;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;
    info!("starting auth server");

    let state = AppState::in_memory(settings.http_request_body_limit_bytes);
    run_http(&settings, state).await
}
