use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, uid: Uuid) -> Result<User, DomainError>;
    /// Stores `user` under a freshly assigned uid and returns the stored copy.
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
