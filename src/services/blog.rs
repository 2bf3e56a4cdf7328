//! Blog service
//!
//! Read-only access to published posts with pagination and filtering.

use crate::db::repositories::BlogPostRepository;
use crate::models::{BlogFilter, BlogPost};
use serde::Serialize;
use std::sync::Arc;

/// Default page size for post listings
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum page size for post listings
const MAX_PAGE_SIZE: u32 = 100;

/// Error types for blog service operations
#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    /// Post not found (or not published)
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Pagination parameters for post listings
///
/// Out-of-range values are clamped rather than rejected: page is at least 1
/// and the page size stays within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Create pagination parameters, clamping out-of-range values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        ((self.page - 1) as i64) * (self.limit as i64)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// A page of published posts with pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PagedPosts {
    pub posts: Vec<BlogPost>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PagedPosts {
    fn new(posts: Vec<BlogPost>, total: i64, params: PageParams) -> Self {
        let total_pages = ((total as u64 + params.limit as u64 - 1) / params.limit as u64) as u32;
        Self {
            posts,
            total,
            page: params.page,
            limit: params.limit,
            total_pages,
        }
    }
}

/// Blog service for the public reading surface
pub struct BlogService {
    repo: Arc<dyn BlogPostRepository>,
}

impl BlogService {
    /// Create a new blog service
    pub fn new(repo: Arc<dyn BlogPostRepository>) -> Self {
        Self { repo }
    }

    /// List published posts matching the filter, most recently published first
    ///
    /// The total count reflects the filter, not just the current page, so
    /// clients can render correct pagination controls.
    pub async fn list_published(
        &self,
        filter: &BlogFilter,
        params: PageParams,
    ) -> Result<PagedPosts, BlogServiceError> {
        let total = self.repo.count_published(filter).await?;
        let posts = self
            .repo
            .list_published(filter, params.offset(), params.limit())
            .await?;

        Ok(PagedPosts::new(posts, total, params))
    }

    /// Get a published post by slug
    ///
    /// Drafts are reported as not found, identically to missing slugs.
    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost, BlogServiceError> {
        self.repo
            .get_published_by_slug(slug)
            .await?
            .ok_or_else(|| BlogServiceError::NotFound(slug.to_string()))
    }
}
