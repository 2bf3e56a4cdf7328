//! Blog endpoints

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::common::parse_numeric_param;
use crate::api::responses::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::models::BlogFilter;
use crate::services::{BlogServiceError, PageParams};

/// Query parameters for the post listing
///
/// `page` and `limit` arrive as raw strings and are parsed explicitly;
/// non-numeric values are rejected rather than silently defaulted.
#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Build the blog router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog", get(list_posts))
        .route("/blog/{slug}", get(get_post))
}

/// GET /api/blog
async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Response, ApiError> {
    let page = parse_numeric_param("page", query.page.as_deref(), 1)?;
    let limit = parse_numeric_param("limit", query.limit.as_deref(), 10)?;
    let params = PageParams::new(page, limit);

    let filter = BlogFilter {
        category: query.category.filter(|s| !s.is_empty()),
        tag: query.tag.filter(|s| !s.is_empty()),
    };

    let posts = state
        .blog_service
        .list_published(&filter, params)
        .await
        .map_err(|e| match e {
            BlogServiceError::NotFound(_) => ApiError::not_found("Blog post not found"),
            BlogServiceError::Internal(err) => {
                ApiError::internal("Failed to fetch blog posts", err)
            }
        })?;

    Ok(ApiResponse::ok(posts))
}

/// GET /api/blog/{slug}
async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let post = state
        .blog_service
        .get_by_slug(&slug)
        .await
        .map_err(|e| match e {
            BlogServiceError::NotFound(_) => ApiError::not_found("Blog post not found"),
            BlogServiceError::Internal(err) => ApiError::internal("Failed to fetch blog post", err),
        })?;

    Ok(ApiResponse::ok(post))
}
