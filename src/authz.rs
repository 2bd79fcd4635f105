//! Role and ownership checks over verified claims.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::user::UserRole;
use crate::responses::JsonResponse;
use crate::token::Claims;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("access denied")]
pub struct Forbidden;

impl IntoResponse for Forbidden {
    fn into_response(self) -> Response {
        JsonResponse::forbidden("Access denied").into_response()
    }
}

pub fn require_role(claims: &Claims, role: UserRole) -> Result<(), Forbidden> {
    if claims.role() == role {
        Ok(())
    } else {
        Err(Forbidden)
    }
}

/// Passes for the resource owner or anyone holding `role`.
pub fn require_owner_or_role(
    claims: &Claims,
    resource_owner_id: i64,
    role: UserRole,
) -> Result<(), Forbidden> {
    if claims.user_id() == resource_owner_id {
        return Ok(());
    }
    require_role(claims, role)
}
