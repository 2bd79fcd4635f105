pub mod activity_log;
pub mod project;
pub mod register;
pub mod user;
