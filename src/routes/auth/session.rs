use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::warn;

use crate::responses::JsonResponse;
use crate::token::{AuthError, Claims, TokenManager};

/// Verified claims of the bearer presenting `Authorization: Bearer <token>`.
#[derive(Debug, PartialEq)]
pub struct AuthSession(pub Claims);

/// Every variant renders the same 401 so callers cannot tell which check failed.
#[derive(Debug, PartialEq)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        warn!(reason = self.0.reason(), error = %self.0, "rejected bearer credential");
        JsonResponse::unauthorized("Unauthorized").into_response()
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    Arc<TokenManager>: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthRejection(AuthError::MissingCredential))?;

        let tokens = Arc::<TokenManager>::from_ref(state);
        let claims = tokens.verify(bearer.token()).map_err(AuthRejection)?;

        Ok(AuthSession(claims))
    }
}
