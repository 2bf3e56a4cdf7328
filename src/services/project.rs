//! Project service

use crate::db::repositories::ProjectRepository;
use crate::models::Project;
use std::sync::Arc;

/// Error types for project service operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    /// Project not found
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Project service for the portfolio listing
pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    /// Create a new project service
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    /// List projects, newest first, optionally restricted to featured ones
    pub async fn list(&self, featured_only: bool) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(self.repo.list(featured_only).await?)
    }

    /// Get a single project by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Project, ProjectServiceError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ProjectServiceError::NotFound(slug.to_string()))
    }
}
