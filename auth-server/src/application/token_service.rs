use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::token::TokenPair;
use crate::domain::user::User;

#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issues a fresh pair for `user`. `prev_token_id` is empty on first issue.
    async fn new_pair_from_user(
        &self,
        user: &User,
        prev_token_id: &str,
    ) -> Result<TokenPair, DomainError>;
}

/// Hands out random, meaningless token values.
#[derive(Debug, Default)]
pub struct OpaqueTokenService;

impl OpaqueTokenService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokenService for OpaqueTokenService {
    async fn new_pair_from_user(
        &self,
        user: &User,
        prev_token_id: &str,
    ) -> Result<TokenPair, DomainError> {
        if !prev_token_id.is_empty() {
            debug!(uid = %user.uid, prev_token_id, "replacing previous token pair");
        }

        Ok(TokenPair {
            id_token: Uuid::new_v4().to_string(),
            refresh_token: Uuid::new_v4().to_string(),
        })
    }
}
