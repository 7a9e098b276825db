use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;

/// Process-local user store. Emails are unique, compared case-insensitively.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, uid: Uuid) -> Result<User, DomainError> {
        self.users
            .read()
            .await
            .get(&uid)
            .cloned()
            .ok_or_else(|| DomainError::resource_not_found("uid", &uid.to_string()))
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::resource_conflict("email", &user.email));
        }

        user.uid = Uuid::new_v4();
        users.insert(user.uid, user.clone());
        Ok(user)
    }
}
