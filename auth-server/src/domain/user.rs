use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub uid: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub image_url: String,
    pub website: String,
}

impl User {
    /// A user that has not been stored yet; the repository assigns `uid`.
    pub fn with_credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uid: Uuid::nil(),
            email: email.into(),
            password: password.into(),
            name: String::new(),
            image_url: String::new(),
            website: String::new(),
        }
    }
}
