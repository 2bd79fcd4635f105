use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::user::UserRole;

/// Identity attributes a caller vouches for when asking for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// Identity and authorization data carried inside a token.
///
/// Only [`TokenManager`](super::TokenManager) builds these: by stamping a
/// principal at issuance, or from a claims object whose signature it has
/// already checked. Field order is the serialized key order.
///
/// ```compile_fail
/// let forged: tracker_backend::token::Claims = serde_json::from_str(
///     r#"{"user_id":1,"username":"x","email":"x@x.com","role":"admin","issued_at":0,"expires_at":0}"#,
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    user_id: i64,
    username: String,
    email: String,
    role: UserRole,
    issued_at: i64,
    expires_at: i64,
}

#[derive(Deserialize)]
struct SignedClaims {
    user_id: i64,
    username: String,
    email: String,
    role: UserRole,
    issued_at: i64,
    expires_at: i64,
}

impl Claims {
    pub(crate) fn stamp(principal: Principal, issued_at: i64, expires_at: i64) -> Self {
        Self {
            user_id: principal.user_id,
            username: principal.username,
            email: principal.email,
            role: principal.role,
            issued_at,
            expires_at,
        }
    }

    /// Caller must have verified the signature over `claims` first.
    pub(crate) fn from_signed(claims: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let signed: SignedClaims = serde_json::from_value(Value::Object(claims))?;
        Ok(Self {
            user_id: signed.user_id,
            username: signed.username,
            email: signed.email,
            role: signed.role,
            issued_at: signed.issued_at,
            expires_at: signed.expires_at,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Unix seconds.
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Unix seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}
