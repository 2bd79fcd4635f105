use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use super::session::AuthSession;
use crate::{
    models::{register::LoginPayload, user::PublicUser},
    responses::JsonResponse,
    state::AppState,
    token::Principal,
    utils::password::verify_password,
};

pub async fn handle_login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Response {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return JsonResponse::bad_request("Fields cannot be empty").into_response();
    }

    let user = match app_state.db.find_user_by_username(username).await {
        Ok(Some(record)) => record,
        Ok(None) => return JsonResponse::unauthorized("Invalid credentials").into_response(),
        Err(err) => {
            error!(?err, "failed to load user during login");
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return JsonResponse::unauthorized("Invalid credentials").into_response(),
        Err(err) => {
            error!(?err, user_id = user.id, "stored password hash could not be parsed");
            return JsonResponse::server_error("Internal error").into_response();
        }
    }

    let public_user = PublicUser::from(&user);
    let principal = Principal {
        user_id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    };

    match app_state.tokens.issue(principal) {
        Ok(token) => {
            info!(user_id = public_user.id, role = %public_user.role, "login succeeded");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Login successful",
                    "token": token,
                    "user": public_user,
                })),
            )
                .into_response()
        }
        Err(err) => {
            error!(?err, user_id = public_user.id, "failed to issue token");
            JsonResponse::server_error("Token generation failed").into_response()
        }
    }
}

pub async fn handle_me(AuthSession(claims): AuthSession) -> Response {
    Json(json!({
        "success": true,
        "user": PublicUser::from(claims.principal()),
        "issued_at": claims.issued_at(),
        "expires_at": claims.expires_at(),
    }))
    .into_response()
}
