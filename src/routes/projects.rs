use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::{
    authz::{require_owner_or_role, Forbidden},
    models::{
        activity_log::NewActivityLog,
        project::{CreateProjectPayload, Project, ProjectUpdate},
        user::UserRole,
    },
    responses::JsonResponse,
    routes::auth::AuthSession,
    state::AppState,
    token::Claims,
};

/// Activity is best effort; a failed insert never fails the request.
async fn record_activity(
    app_state: &AppState,
    user_id: i64,
    action: &str,
    project_id: i64,
    description: String,
) {
    let entry = NewActivityLog {
        user_id,
        action: action.to_string(),
        project_id: Some(project_id),
        description,
    };
    if let Err(err) = app_state.activity_repo.record_activity(&entry).await {
        warn!(?err, user_id, project_id, action, "failed to record activity");
    }
}

/// Loads a project the caller may act on, or the response to send instead.
async fn load_authorized_project(
    app_state: &AppState,
    claims: &Claims,
    project_id: i64,
) -> Result<Project, Response> {
    let project = match app_state.project_repo.find_project(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return Err(JsonResponse::not_found("Project not found").into_response()),
        Err(err) => {
            error!(?err, project_id, "failed to load project");
            return Err(JsonResponse::server_error("Failed to load project").into_response());
        }
    };

    require_owner_or_role(claims, project.created_by, UserRole::Admin)
        .map_err(Forbidden::into_response)?;

    Ok(project)
}

pub async fn list_projects(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Response {
    let owner = match claims.role() {
        UserRole::Admin => None,
        UserRole::User => Some(claims.user_id()),
    };

    match app_state.project_repo.list_projects(owner).await {
        Ok(projects) => Json(json!({ "success": true, "data": projects })).into_response(),
        Err(err) => {
            error!(?err, user_id = claims.user_id(), "failed to list projects");
            JsonResponse::server_error("Failed to list projects").into_response()
        }
    }
}

pub async fn get_project(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(project_id): Path<i64>,
) -> Response {
    match load_authorized_project(&app_state, &claims, project_id).await {
        Ok(project) => Json(json!({ "success": true, "data": project })).into_response(),
        Err(resp) => resp,
    }
}

pub async fn create_project(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(payload): Json<CreateProjectPayload>,
) -> Response {
    let project = match payload.normalize() {
        Ok(project) => project,
        Err(msg) => return JsonResponse::bad_request(msg).into_response(),
    };

    let user_id = claims.user_id();
    match app_state.project_repo.create_project(user_id, &project).await {
        Ok(project_id) => {
            record_activity(
                &app_state,
                user_id,
                "Project created",
                project_id,
                format!("Project '{}' created", project.title),
            )
            .await;
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Project created",
                    "project_id": project_id,
                })),
            )
                .into_response()
        }
        Err(err) => {
            error!(?err, user_id, "failed to create project");
            JsonResponse::server_error("Failed to create project").into_response()
        }
    }
}

pub async fn update_project(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(project_id): Path<i64>,
    Json(payload): Json<ProjectUpdate>,
) -> Response {
    if let Err(resp) = load_authorized_project(&app_state, &claims, project_id).await {
        return resp;
    }

    let Some(update) = payload.normalize() else {
        return JsonResponse::bad_request("No fields to update").into_response();
    };

    match app_state.project_repo.update_project(project_id, &update).await {
        Ok(true) => {
            record_activity(
                &app_state,
                claims.user_id(),
                "Project updated",
                project_id,
                "Project updated".to_string(),
            )
            .await;
            JsonResponse::success("Project updated").into_response()
        }
        Ok(false) => JsonResponse::not_found("Project not found").into_response(),
        Err(err) => {
            error!(?err, project_id, "failed to update project");
            JsonResponse::server_error("Failed to update project").into_response()
        }
    }
}

pub async fn delete_project(
    State(app_state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(project_id): Path<i64>,
) -> Response {
    if let Err(resp) = load_authorized_project(&app_state, &claims, project_id).await {
        return resp;
    }

    match app_state.project_repo.delete_project(project_id).await {
        Ok(true) => {
            record_activity(
                &app_state,
                claims.user_id(),
                "Project deleted",
                project_id,
                "Project deleted".to_string(),
            )
            .await;
            JsonResponse::success("Project deleted").into_response()
        }
        Ok(false) => JsonResponse::not_found("Project not found").into_response(),
        Err(err) => {
            error!(?err, project_id, "failed to delete project");
            JsonResponse::server_error("Failed to delete project").into_response()
        }
    }
}
