use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::db::mock_db::MockDb;
use crate::models::user::{User, UserRole};
use crate::state::AppState;
use crate::token::{Principal, TokenConfig, TokenManager, TokenSecret};
use crate::utils::password::hash_password;

pub const TEST_SECRET: &str = "route-tests-0123456789abcdefghijklm";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub db: Arc<MockDb>,
}

pub fn build_app(db: MockDb) -> TestApp {
    let db = Arc::new(db);
    let state = AppState {
        db: db.clone(),
        project_repo: db.clone(),
        activity_repo: db.clone(),
        tokens: Arc::new(TokenManager::new(&TokenConfig::new(
            TokenSecret::new(TEST_SECRET).unwrap(),
        ))),
    };

    TestApp {
        app: super::router(state.clone()),
        state,
        db,
    }
}

pub fn user_with_password(id: i64, username: &str, password: &str, role: UserRole) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(password).unwrap(),
        role,
        created_at: OffsetDateTime::now_utc(),
    }
}

pub fn issue_token(state: &AppState, user_id: i64, username: &str, role: UserRole) -> String {
    state
        .tokens
        .issue(Principal {
            user_id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role,
        })
        .unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
