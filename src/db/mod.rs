pub mod activity_log_repository;
pub mod postgres_activity_log_repository;
pub mod postgres_project_repository;
pub mod postgres_user_repository;
pub mod project_repository;
pub mod user_repository;

#[cfg(test)]
pub mod mock_db;
