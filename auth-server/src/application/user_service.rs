use async_trait::async_trait;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get(&self, uid: Uuid) -> Result<User, DomainError>;
    async fn sign_up(&self, user: User) -> Result<User, DomainError>;
}

pub struct AccountUserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AccountUserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: UserRepository> UserService for AccountUserService<R> {
    async fn get(&self, uid: Uuid) -> Result<User, DomainError> {
        self.repo.find_by_id(uid).await
    }

    async fn sign_up(&self, user: User) -> Result<User, DomainError> {
        self.repo.create(user).await
    }
}
