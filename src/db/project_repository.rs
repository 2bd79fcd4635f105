use async_trait::async_trait;

use crate::models::project::{NewProject, Project, ProjectUpdate};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Newest first. `None` lists every project.
    async fn list_projects(&self, owner_id: Option<i64>) -> Result<Vec<Project>, sqlx::Error>;
    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, sqlx::Error>;
    async fn create_project(
        &self,
        owner_id: i64,
        project: &NewProject,
    ) -> Result<i64, sqlx::Error>;
    /// Returns false when no row matched.
    async fn update_project(
        &self,
        project_id: i64,
        update: &ProjectUpdate,
    ) -> Result<bool, sqlx::Error>;
    async fn delete_project(&self, project_id: i64) -> Result<bool, sqlx::Error>;
}
