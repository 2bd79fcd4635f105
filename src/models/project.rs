use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

pub const DEFAULT_PROJECT_STATUS: &str = "Pending";

/// A project row joined with its creator's username.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub status: String,
    pub created_by: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date_created: OffsetDateTime,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProjectPayload {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub summary: String,
    pub status: String,
}

impl CreateProjectPayload {
    pub fn normalize(self) -> Result<NewProject, &'static str> {
        let title = self.title.trim().to_string();
        let summary = self.summary.trim().to_string();
        if title.is_empty() || summary.is_empty() {
            return Err("Title and summary cannot be empty");
        }

        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string());

        Ok(NewProject {
            title,
            summary,
            status,
        })
    }
}

/// Partial update; blank strings count as absent.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ProjectUpdate {
    pub fn normalize(self) -> Option<Self> {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let update = Self {
            title: clean(self.title),
            summary: clean(self.summary),
            status: clean(self.status),
        };

        if update.title.is_none() && update.summary.is_none() && update.status.is_none() {
            None
        } else {
            Some(update)
        }
    }
}
