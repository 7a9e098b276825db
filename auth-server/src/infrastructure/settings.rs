use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub auth_api_url: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub shutdown_timeout_secs: u64,
}

impl Settings {
    pub const DEFAULT_AUTH_API_URL: &'static str = "/api/account";

    pub fn from_env() -> Result<Self> {
        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let auth_api_url = parse_route_prefix(
            std::env::var("AUTH_API_URL").unwrap_or_else(|_| Self::DEFAULT_AUTH_API_URL.to_string()),
        )?;
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let shutdown_timeout_secs = parse_u64_env("SHUTDOWN_TIMEOUT_SECS", 5)?;

        Ok(Self {
            http_addr,
            auth_api_url,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            shutdown_timeout_secs,
        })
    }
}

fn parse_route_prefix(raw: String) -> Result<String> {
    let prefix = raw.trim().trim_end_matches('/');
    if prefix.is_empty() {
        return Err(anyhow!("AUTH_API_URL must not be empty or \"/\""));
    }
    if !prefix.starts_with('/') {
        return Err(anyhow!("AUTH_API_URL must start with '/', got {prefix:?}"));
    }
    Ok(prefix.to_string())
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
