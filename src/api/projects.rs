//! Project endpoints

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::responses::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::services::ProjectServiceError;

/// Query parameters for the project listing
#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    /// Only the literal "true" (case-insensitive) enables the filter
    pub featured: Option<String>,
}

/// Build the projects router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/{slug}", get(get_project))
}

/// GET /api/projects
async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Result<Response, ApiError> {
    let featured_only = query
        .featured
        .as_deref()
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let projects = state
        .project_service
        .list(featured_only)
        .await
        .map_err(|e| match e {
            ProjectServiceError::NotFound(_) => ApiError::not_found("Project not found"),
            ProjectServiceError::Internal(err) => {
                ApiError::internal("Failed to fetch projects", err)
            }
        })?;

    Ok(ApiResponse::ok(projects))
}

/// GET /api/projects/{slug}
async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let project = state
        .project_service
        .get_by_slug(&slug)
        .await
        .map_err(|e| match e {
            ProjectServiceError::NotFound(_) => ApiError::not_found("Project not found"),
            ProjectServiceError::Internal(err) => {
                ApiError::internal("Failed to fetch project", err)
            }
        })?;

    Ok(ApiResponse::ok(project))
}
