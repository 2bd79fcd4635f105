use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;
use time::OffsetDateTime;

use super::activity_log_repository::ActivityLogRepository;
use super::project_repository::ProjectRepository;
use super::user_repository::UserRepository;
use crate::models::activity_log::{ActivityLogEntry, NewActivityLog};
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::user::{User, UserRole};

/// In-memory stand-in for every repository trait.
#[derive(Default)]
pub struct MockDb {
    pub users: Mutex<Vec<User>>,
    pub projects: Mutex<Vec<Project>>,
    pub activity: Mutex<Vec<NewActivityLog>>,
    pub should_fail: bool,
    pub fail_activity: bool,
    /// `create_user` behaves as if a concurrent insert took the username first.
    pub lose_insert_race: bool,
}

#[derive(Debug, Error)]
#[error("duplicate key value violates unique constraint \"users_username_key\"")]
struct UniqueViolation;

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint \"users_username_key\""
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

impl MockDb {
    fn check(&self) -> Result<(), sqlx::Error> {
        if self.should_fail {
            return Err(sqlx::Error::Protocol("Mock DB failure".into()));
        }
        Ok(())
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn with_project(self, project: Project) -> Self {
        self.projects.lock().unwrap().push(project);
        self
    }

    pub fn recorded_actions(&self) -> Vec<String> {
        self.activity
            .lock()
            .unwrap()
            .iter()
            .map(|entry| entry.action.clone())
            .collect()
    }

    fn username_for(&self, user_id: i64) -> String {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for MockDb {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn is_username_or_email_taken(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<i64, sqlx::Error> {
        self.check()?;
        if self.lose_insert_race {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation)));
        }
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }
}

#[async_trait]
impl ProjectRepository for MockDb {
    async fn list_projects(&self, owner_id: Option<i64>) -> Result<Vec<Project>, sqlx::Error> {
        self.check()?;
        let mut projects: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| owner_id.map_or(true, |owner| p.created_by == owner))
            .cloned()
            .collect();
        projects.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(projects)
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<Project>, sqlx::Error> {
        self.check()?;
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned())
    }

    async fn create_project(
        &self,
        owner_id: i64,
        project: &NewProject,
    ) -> Result<i64, sqlx::Error> {
        self.check()?;
        let username = self.username_for(owner_id);
        let mut projects = self.projects.lock().unwrap();
        let id = projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        projects.push(Project {
            id,
            title: project.title.clone(),
            summary: project.summary.clone(),
            status: project.status.clone(),
            created_by: owner_id,
            date_created: OffsetDateTime::now_utc(),
            username,
        });
        Ok(id)
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: &ProjectUpdate,
    ) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(false);
        };
        if let Some(title) = &update.title {
            project.title = title.clone();
        }
        if let Some(summary) = &update.summary {
            project.summary = summary.clone();
        }
        if let Some(status) = &update.status {
            project.status = status.clone();
        }
        Ok(true)
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != project_id);
        Ok(projects.len() != before)
    }
}

#[async_trait]
impl ActivityLogRepository for MockDb {
    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), sqlx::Error> {
        self.check()?;
        if self.fail_activity {
            return Err(sqlx::Error::Protocol("Mock activity failure".into()));
        }
        self.activity.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_recent_activity(
        &self,
        limit: i64,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        self.check()?;
        let activity = self.activity.lock().unwrap().clone();
        let projects = self.projects.lock().unwrap().clone();

        let entries = activity
            .iter()
            .enumerate()
            .rev()
            .take(limit.max(0) as usize)
            .map(|(index, entry)| ActivityLogEntry {
                id: index as i64 + 1,
                action: entry.action.clone(),
                description: entry.description.clone(),
                created_at: OffsetDateTime::now_utc(),
                username: self.username_for(entry.user_id),
                project_title: entry.project_id.and_then(|id| {
                    projects
                        .iter()
                        .find(|p| p.id == id)
                        .map(|p| p.title.clone())
                }),
            })
            .collect();
        Ok(entries)
    }
}
