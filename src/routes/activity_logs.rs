use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::{
    authz::require_role, models::user::UserRole, responses::JsonResponse,
    routes::auth::AuthSession, state::AppState,
};

pub const RECENT_ACTIVITY_LIMIT: i64 = 100;

/// Most recent activity across all users, newest first. Admin only.
pub async fn list_activity_logs(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Response {
    if let Err(forbidden) = require_role(&claims, UserRole::Admin) {
        return forbidden.into_response();
    }

    match app_state
        .activity_repo
        .list_recent_activity(RECENT_ACTIVITY_LIMIT)
        .await
    {
        Ok(entries) => Json(json!({ "success": true, "data": entries })).into_response(),
        Err(err) => {
            error!(?err, "failed to list activity logs");
            JsonResponse::server_error("Failed to load activity logs").into_response()
        }
    }
}
