use axum::response::IntoResponse;

use crate::responses::JsonResponse;

pub async fn health() -> impl IntoResponse {
    JsonResponse::success("ok")
}
