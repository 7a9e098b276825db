use std::sync::Arc;

use crate::application::token_service::{OpaqueTokenService, TokenService};
use crate::application::user_service::{AccountUserService, UserService};
use crate::data::repositories::memory::user_repository::InMemoryUserRepository;

pub mod http;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub token_service: Arc<dyn TokenService>,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserService>,
        token_service: Arc<dyn TokenService>,
        body_limit_bytes: usize,
    ) -> Self {
        Self {
            user_service,
            token_service,
            body_limit_bytes,
        }
    }

    /// Wiring used by the binary: in-memory users, opaque tokens.
    pub fn in_memory(body_limit_bytes: usize) -> Self {
        Self::new(
            Arc::new(AccountUserService::new(InMemoryUserRepository::new())),
            Arc::new(OpaqueTokenService::new()),
            body_limit_bytes,
        )
    }
}
