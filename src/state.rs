use std::sync::Arc;

use axum::extract::FromRef;

use crate::db::{
    activity_log_repository::ActivityLogRepository, project_repository::ProjectRepository,
    user_repository::UserRepository,
};
use crate::token::TokenManager;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn UserRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub activity_repo: Arc<dyn ActivityLogRepository>,
    pub tokens: Arc<TokenManager>,
}

impl FromRef<AppState> for Arc<TokenManager> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
