pub mod activity_logs;
pub mod auth;
pub mod health;
pub mod projects;

#[cfg(test)]
pub mod test_support;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Routes mounted under `/api/auth`. Split out so the binary can rate limit them.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::handle_register))
        .route("/login", post(auth::handle_login))
        .route("/me", get(auth::handle_me))
}

/// Assemble the API around an already layered set of auth routes.
pub fn build(state: AppState, auth_routes: Router<AppState>) -> Router {
    let project_routes = Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{project_id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        );

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/auth", auth_routes)
        .nest("/api/projects", project_routes)
        .route("/api/activity-logs", get(activity_logs::list_activity_logs))
        .with_state(state)
}

pub fn router(state: AppState) -> Router {
    build(state, auth_routes())
}
