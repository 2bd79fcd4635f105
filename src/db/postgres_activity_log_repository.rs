use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::activity_log_repository::ActivityLogRepository,
    models::activity_log::{ActivityLogEntry, NewActivityLog},
};

pub struct PostgresActivityLogRepository {
    pub pool: PgPool,
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (user_id, action, project_id, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(entry.project_id)
        .bind(&entry.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent_activity(
        &self,
        limit: i64,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            SELECT a.id,
                   a.action,
                   a.description,
                   a.created_at,
                   u.username,
                   p.title AS project_title
            FROM activity_logs a
            JOIN users u ON a.user_id = u.id
            LEFT JOIN projects p ON a.project_id = p.id
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
