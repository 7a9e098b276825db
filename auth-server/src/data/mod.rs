pub mod repositories;
pub mod user_repository;
