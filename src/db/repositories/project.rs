//! Project repository
//!
//! Database operations for portfolio projects.
//!
//! This module provides:
//! - `ProjectRepository` trait defining the interface for project data access
//! - `SqlxProjectRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::repositories::{decode_string_list, encode_string_list};
use crate::db::DynDatabasePool;
use crate::models::{NewProject, Project};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Project repository trait
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create a new project
    async fn create(&self, input: &NewProject) -> Result<Project>;

    /// List projects, newest first
    ///
    /// When `featured_only` is set, only featured projects are returned.
    async fn list(&self, featured_only: bool) -> Result<Vec<Project>>;

    /// Get a project by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Project>>;
}

/// SQLx-based project repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxProjectRepository {
    pool: DynDatabasePool,
}

impl SqlxProjectRepository {
    /// Create a new SQLx project repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ProjectRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn create(&self, input: &NewProject) -> Result<Project> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_project_sqlite(self.pool.as_sqlite().unwrap(), input).await
            }
            DatabaseDriver::Mysql => {
                create_project_mysql(self.pool.as_mysql().unwrap(), input).await
            }
        }
    }

    async fn list(&self, featured_only: bool) -> Result<Vec<Project>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_projects_sqlite(self.pool.as_sqlite().unwrap(), featured_only).await
            }
            DatabaseDriver::Mysql => {
                list_projects_mysql(self.pool.as_mysql().unwrap(), featured_only).await
            }
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_project_by_slug_sqlite(self.pool.as_sqlite().unwrap(), slug).await
            }
            DatabaseDriver::Mysql => {
                get_project_by_slug_mysql(self.pool.as_mysql().unwrap(), slug).await
            }
        }
    }
}

const PROJECT_COLUMNS: &str = "id, title, slug, description, tech_stack, image_url, \
                               github_url, live_url, featured, created_at, updated_at";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_project_sqlite(pool: &SqlitePool, input: &NewProject) -> Result<Project> {
    let now = Utc::now();
    let tech_stack = encode_string_list(&input.tech_stack)?;

    let result = sqlx::query(
        r#"
        INSERT INTO projects (title, slug, description, tech_stack, image_url,
                              github_url, live_url, featured, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(&tech_stack)
    .bind(&input.image_url)
    .bind(&input.github_url)
    .bind(&input.live_url)
    .bind(input.featured)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create project")?;

    let id = result.last_insert_rowid();

    Ok(Project {
        id,
        title: input.title.clone(),
        slug: input.slug.clone(),
        description: input.description.clone(),
        tech_stack: input.tech_stack.clone(),
        image_url: input.image_url.clone(),
        github_url: input.github_url.clone(),
        live_url: input.live_url.clone(),
        featured: input.featured,
        created_at: now,
        updated_at: now,
    })
}

async fn list_projects_sqlite(pool: &SqlitePool, featured_only: bool) -> Result<Vec<Project>> {
    let sql = if featured_only {
        format!(
            "SELECT {} FROM projects WHERE featured = 1 ORDER BY created_at DESC",
            PROJECT_COLUMNS
        )
    } else {
        format!(
            "SELECT {} FROM projects ORDER BY created_at DESC",
            PROJECT_COLUMNS
        )
    };

    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list projects")?;

    let mut projects = Vec::new();
    for row in rows {
        projects.push(row_to_project_sqlite(&row)?);
    }

    Ok(projects)
}

async fn get_project_by_slug_sqlite(pool: &SqlitePool, slug: &str) -> Result<Option<Project>> {
    let sql = format!("SELECT {} FROM projects WHERE slug = ?", PROJECT_COLUMNS);

    let row = sqlx::query(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get project by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_project_sqlite(&row)?)),
        None => Ok(None),
    }
}

fn row_to_project_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Project> {
    let tech_stack: Option<String> = row.get("tech_stack");

    Ok(Project {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
        tech_stack: decode_string_list(tech_stack.as_deref())?,
        image_url: row.get("image_url"),
        github_url: row.get("github_url"),
        live_url: row.get("live_url"),
        featured: row.get("featured"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_project_mysql(pool: &MySqlPool, input: &NewProject) -> Result<Project> {
    let now = Utc::now();
    let tech_stack = encode_string_list(&input.tech_stack)?;

    let result = sqlx::query(
        r#"
        INSERT INTO projects (title, slug, description, tech_stack, image_url,
                              github_url, live_url, featured, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(&tech_stack)
    .bind(&input.image_url)
    .bind(&input.github_url)
    .bind(&input.live_url)
    .bind(input.featured)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create project")?;

    let id = result.last_insert_id() as i64;

    Ok(Project {
        id,
        title: input.title.clone(),
        slug: input.slug.clone(),
        description: input.description.clone(),
        tech_stack: input.tech_stack.clone(),
        image_url: input.image_url.clone(),
        github_url: input.github_url.clone(),
        live_url: input.live_url.clone(),
        featured: input.featured,
        created_at: now,
        updated_at: now,
    })
}

async fn list_projects_mysql(pool: &MySqlPool, featured_only: bool) -> Result<Vec<Project>> {
    let sql = if featured_only {
        format!(
            "SELECT {} FROM projects WHERE featured = 1 ORDER BY created_at DESC",
            PROJECT_COLUMNS
        )
    } else {
        format!(
            "SELECT {} FROM projects ORDER BY created_at DESC",
            PROJECT_COLUMNS
        )
    };

    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list projects")?;

    let mut projects = Vec::new();
    for row in rows {
        projects.push(row_to_project_mysql(&row)?);
    }

    Ok(projects)
}

async fn get_project_by_slug_mysql(pool: &MySqlPool, slug: &str) -> Result<Option<Project>> {
    let sql = format!("SELECT {} FROM projects WHERE slug = ?", PROJECT_COLUMNS);

    let row = sqlx::query(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get project by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_project_mysql(&row)?)),
        None => Ok(None),
    }
}

fn row_to_project_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Project> {
    let tech_stack: Option<String> = row.get("tech_stack");

    Ok(Project {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
        tech_stack: decode_string_list(tech_stack.as_deref())?,
        image_url: row.get("image_url"),
        github_url: row.get("github_url"),
        live_url: row.get("live_url"),
        featured: row.get("featured"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxProjectRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxProjectRepository::new(pool)
    }

    fn sample_project(slug: &str, featured: bool) -> NewProject {
        NewProject {
            title: format!("Project {}", slug),
            slug: slug.to_string(),
            description: Some("A sample project".to_string()),
            tech_stack: vec!["Rust".to_string(), "Axum".to_string()],
            image_url: None,
            github_url: Some(format!("https://github.com/example/{}", slug)),
            live_url: None,
            featured,
        }
    }

    #[tokio::test]
    async fn test_create_project() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(&sample_project("my-project", false))
            .await
            .expect("Failed to create project");

        assert!(created.id > 0);
        assert_eq!(created.slug, "my-project");
        assert_eq!(created.tech_stack, vec!["Rust", "Axum"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_fails() {
        let repo = setup_test_repo().await;
        repo.create(&sample_project("dup", false))
            .await
            .expect("Failed to create project");

        let result = repo.create(&sample_project("dup", false)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_projects_newest_first() {
        let repo = setup_test_repo().await;
        repo.create(&sample_project("older", false)).await.unwrap();
        repo.create(&sample_project("newer", false)).await.unwrap();

        let projects = repo.list(false).await.expect("Failed to list projects");

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].slug, "newer");
        assert_eq!(projects[1].slug, "older");
    }

    #[tokio::test]
    async fn test_list_featured_only() {
        let repo = setup_test_repo().await;
        repo.create(&sample_project("regular", false)).await.unwrap();
        repo.create(&sample_project("starred", true)).await.unwrap();

        let projects = repo.list(true).await.expect("Failed to list projects");

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].slug, "starred");
        assert!(projects[0].featured);
    }

    #[tokio::test]
    async fn test_get_project_by_slug() {
        let repo = setup_test_repo().await;
        repo.create(&sample_project("findable", false)).await.unwrap();

        let found = repo
            .get_by_slug("findable")
            .await
            .expect("Failed to get project")
            .expect("Project not found");

        assert_eq!(found.slug, "findable");
        assert_eq!(found.tech_stack, vec!["Rust", "Axum"]);
    }

    #[tokio::test]
    async fn test_get_project_by_slug_not_found() {
        let repo = setup_test_repo().await;

        let found = repo
            .get_by_slug("nonexistent")
            .await
            .expect("Failed to get project");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_empty_tech_stack_round_trips() {
        let repo = setup_test_repo().await;
        let mut input = sample_project("no-tech", false);
        input.tech_stack = Vec::new();
        repo.create(&input).await.unwrap();

        let found = repo
            .get_by_slug("no-tech")
            .await
            .unwrap()
            .expect("Project not found");

        assert!(found.tech_stack.is_empty());
    }
}
