use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    models::{register::RegisterPayload, user::UserRole},
    responses::JsonResponse,
    state::AppState,
    utils::password::hash_password,
};

pub async fn handle_register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Response {
    let payload = match payload.normalize() {
        Ok(payload) => payload,
        Err(msg) => return JsonResponse::bad_request(msg).into_response(),
    };

    match app_state
        .db
        .is_username_or_email_taken(&payload.username, &payload.email)
        .await
    {
        Ok(false) => {}
        Ok(true) => {
            return JsonResponse::conflict("Username or email already exists").into_response()
        }
        Err(err) => {
            error!(?err, "failed to check for existing user");
            return JsonResponse::server_error("Database error").into_response();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!(?err, "failed to hash password");
            return JsonResponse::server_error("Internal error").into_response();
        }
    };

    match app_state
        .db
        .create_user(
            &payload.username,
            &payload.email,
            &password_hash,
            UserRole::User,
        )
        .await
    {
        Ok(user_id) => {
            info!(user_id, "user registered");
            JsonResponse::created("User registered successfully").into_response()
        }
        // Lost a race with a concurrent registration for the same name or email.
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            JsonResponse::conflict("Username or email already exists").into_response()
        }
        Err(err) => {
            error!(?err, "failed to insert user");
            JsonResponse::server_error("Database error").into_response()
        }
    }
}
