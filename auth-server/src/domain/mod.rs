pub mod error;
pub mod token;
pub mod user;
