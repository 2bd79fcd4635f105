use async_trait::async_trait;

use crate::models::activity_log::{ActivityLogEntry, NewActivityLog};

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), sqlx::Error>;
    async fn list_recent_activity(&self, limit: i64)
        -> Result<Vec<ActivityLogEntry>, sqlx::Error>;
}
