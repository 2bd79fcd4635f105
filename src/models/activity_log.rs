use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityLog {
    pub user_id: i64,
    pub action: String,
    pub project_id: Option<i64>,
    pub description: String,
}

/// An activity row joined with the acting user and, if it still exists, the project.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub action: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub username: String,
    pub project_title: Option<String>,
}
