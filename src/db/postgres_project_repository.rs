use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::project_repository::ProjectRepository,
    models::project::{NewProject, Project, ProjectUpdate},
};

pub struct PostgresProjectRepository {
    pub pool: PgPool,
}

const PROJECT_COLUMNS: &str = r#"
    SELECT p.id, p.title, p.summary, p.status, p.created_by, p.date_created, u.username
    FROM projects p
    JOIN users u ON p.created_by = u.id
"#;

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn list_projects(&self, owner_id: Option<i64>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "{PROJECT_COLUMNS} WHERE ($1::BIGINT IS NULL OR p.created_by = $1) ORDER BY p.date_created DESC, p.id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("{PROJECT_COLUMNS} WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_project(
        &self,
        owner_id: i64,
        project: &NewProject,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO projects (title, summary, status, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&project.title)
        .bind(&project.summary)
        .bind(&project.status)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: &ProjectUpdate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                status = COALESCE($4, status)
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .bind(update.title.as_deref())
        .bind(update.summary.as_deref())
        .bind(update.status.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
