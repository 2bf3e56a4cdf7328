//! Blog post repository
//!
//! Database operations for blog posts. All read paths are restricted to
//! published posts; drafts are only reachable through `create` in seeding
//! and tests.
//!
//! This module provides:
//! - `BlogPostRepository` trait defining the interface for post data access
//! - `SqlxBlogPostRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::repositories::{decode_string_list, encode_string_list};
use crate::db::DynDatabasePool;
use crate::models::{BlogFilter, BlogPost, NewBlogPost};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, input: &NewBlogPost) -> Result<BlogPost>;

    /// List published posts matching the filter, most recently published first
    async fn list_published(
        &self,
        filter: &BlogFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<BlogPost>>;

    /// Count published posts matching the filter
    async fn count_published(&self, filter: &BlogFilter) -> Result<i64>;

    /// Get a published post by slug
    ///
    /// Unpublished posts are indistinguishable from missing ones.
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
}

/// SQLx-based blog post repository implementation
///
/// Supports both SQLite and MySQL databases. Tag membership is checked in
/// SQL with each driver's JSON functions so pagination stays correct.
pub struct SqlxBlogPostRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogPostRepository {
    /// Create a new SQLx blog post repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BlogPostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepository {
    async fn create(&self, input: &NewBlogPost) -> Result<BlogPost> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_post_sqlite(self.pool.as_sqlite().unwrap(), input).await
            }
            DatabaseDriver::Mysql => create_post_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn list_published(
        &self,
        filter: &BlogFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_published_sqlite(self.pool.as_sqlite().unwrap(), filter, offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_published_mysql(self.pool.as_mysql().unwrap(), filter, offset, limit).await
            }
        }
    }

    async fn count_published(&self, filter: &BlogFilter) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                count_published_sqlite(self.pool.as_sqlite().unwrap(), filter).await
            }
            DatabaseDriver::Mysql => {
                count_published_mysql(self.pool.as_mysql().unwrap(), filter).await
            }
        }
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_published_by_slug_sqlite(self.pool.as_sqlite().unwrap(), slug).await
            }
            DatabaseDriver::Mysql => {
                get_published_by_slug_mysql(self.pool.as_mysql().unwrap(), slug).await
            }
        }
    }
}

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, author, category, tags, \
                            featured_image, published, published_at, created_at, updated_at";

/// Exact tag membership test against the JSON `tags` column (SQLite)
const TAG_MATCH_SQLITE: &str =
    " AND tags IS NOT NULL AND EXISTS (SELECT 1 FROM json_each(blog_posts.tags) WHERE json_each.value = ?)";

/// Exact tag membership test against the JSON `tags` column (MySQL)
const TAG_MATCH_MYSQL: &str = " AND tags IS NOT NULL AND JSON_CONTAINS(tags, JSON_QUOTE(?))";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_post_sqlite(pool: &SqlitePool, input: &NewBlogPost) -> Result<BlogPost> {
    let now = Utc::now();
    let tags = encode_string_list(&input.tags)?;

    let result = sqlx::query(
        r#"
        INSERT INTO blog_posts (title, slug, excerpt, content, author, category, tags,
                                featured_image, published, published_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.excerpt)
    .bind(&input.content)
    .bind(&input.author)
    .bind(&input.category)
    .bind(&tags)
    .bind(&input.featured_image)
    .bind(input.published)
    .bind(input.published_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create blog post")?;

    let id = result.last_insert_rowid();

    Ok(BlogPost {
        id,
        title: input.title.clone(),
        slug: input.slug.clone(),
        excerpt: input.excerpt.clone(),
        content: input.content.clone(),
        author: input.author.clone(),
        category: input.category.clone(),
        tags: input.tags.clone(),
        featured_image: input.featured_image.clone(),
        published: input.published,
        published_at: input.published_at,
        created_at: now,
        updated_at: now,
    })
}

fn build_list_sql(dialect_tag_match: &str, filter: &BlogFilter, with_page: bool) -> String {
    let mut sql = if with_page {
        format!(
            "SELECT {} FROM blog_posts WHERE published = 1",
            POST_COLUMNS
        )
    } else {
        "SELECT COUNT(*) as count FROM blog_posts WHERE published = 1".to_string()
    };

    if filter.category.is_some() {
        sql.push_str(" AND category = ?");
    }
    if filter.tag.is_some() {
        sql.push_str(dialect_tag_match);
    }
    if with_page {
        sql.push_str(" ORDER BY published_at DESC LIMIT ? OFFSET ?");
    }

    sql
}

async fn list_published_sqlite(
    pool: &SqlitePool,
    filter: &BlogFilter,
    offset: i64,
    limit: i64,
) -> Result<Vec<BlogPost>> {
    let sql = build_list_sql(TAG_MATCH_SQLITE, filter, true);

    let mut query = sqlx::query(&sql);
    if let Some(category) = &filter.category {
        query = query.bind(category);
    }
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }
    query = query.bind(limit).bind(offset);

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list published posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_sqlite(&row)?);
    }

    Ok(posts)
}

async fn count_published_sqlite(pool: &SqlitePool, filter: &BlogFilter) -> Result<i64> {
    let sql = build_list_sql(TAG_MATCH_SQLITE, filter, false);

    let mut query = sqlx::query(&sql);
    if let Some(category) = &filter.category {
        query = query.bind(category);
    }
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }

    let row = query
        .fetch_one(pool)
        .await
        .context("Failed to count published posts")?;

    Ok(row.get("count"))
}

async fn get_published_by_slug_sqlite(pool: &SqlitePool, slug: &str) -> Result<Option<BlogPost>> {
    let sql = format!(
        "SELECT {} FROM blog_posts WHERE slug = ? AND published = 1",
        POST_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_post_sqlite(&row)?)),
        None => Ok(None),
    }
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<BlogPost> {
    let tags: Option<String> = row.get("tags");

    Ok(BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        excerpt: row.get("excerpt"),
        content: row.get("content"),
        author: row.get("author"),
        category: row.get("category"),
        tags: decode_string_list(tags.as_deref())?,
        featured_image: row.get("featured_image"),
        published: row.get("published"),
        published_at: row.get("published_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_post_mysql(pool: &MySqlPool, input: &NewBlogPost) -> Result<BlogPost> {
    let now = Utc::now();
    let tags = encode_string_list(&input.tags)?;

    let result = sqlx::query(
        r#"
        INSERT INTO blog_posts (title, slug, excerpt, content, author, category, tags,
                                featured_image, published, published_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.excerpt)
    .bind(&input.content)
    .bind(&input.author)
    .bind(&input.category)
    .bind(&tags)
    .bind(&input.featured_image)
    .bind(input.published)
    .bind(input.published_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create blog post")?;

    let id = result.last_insert_id() as i64;

    Ok(BlogPost {
        id,
        title: input.title.clone(),
        slug: input.slug.clone(),
        excerpt: input.excerpt.clone(),
        content: input.content.clone(),
        author: input.author.clone(),
        category: input.category.clone(),
        tags: input.tags.clone(),
        featured_image: input.featured_image.clone(),
        published: input.published,
        published_at: input.published_at,
        created_at: now,
        updated_at: now,
    })
}

async fn list_published_mysql(
    pool: &MySqlPool,
    filter: &BlogFilter,
    offset: i64,
    limit: i64,
) -> Result<Vec<BlogPost>> {
    let sql = build_list_sql(TAG_MATCH_MYSQL, filter, true);

    let mut query = sqlx::query(&sql);
    if let Some(category) = &filter.category {
        query = query.bind(category);
    }
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }
    query = query.bind(limit).bind(offset);

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list published posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_mysql(&row)?);
    }

    Ok(posts)
}

async fn count_published_mysql(pool: &MySqlPool, filter: &BlogFilter) -> Result<i64> {
    let sql = build_list_sql(TAG_MATCH_MYSQL, filter, false);

    let mut query = sqlx::query(&sql);
    if let Some(category) = &filter.category {
        query = query.bind(category);
    }
    if let Some(tag) = &filter.tag {
        query = query.bind(tag);
    }

    let row = query
        .fetch_one(pool)
        .await
        .context("Failed to count published posts")?;

    Ok(row.get("count"))
}

async fn get_published_by_slug_mysql(pool: &MySqlPool, slug: &str) -> Result<Option<BlogPost>> {
    let sql = format!(
        "SELECT {} FROM blog_posts WHERE slug = ? AND published = 1",
        POST_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by slug")?;

    match row {
        Some(row) => Ok(Some(row_to_post_mysql(&row)?)),
        None => Ok(None),
    }
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> Result<BlogPost> {
    let tags: Option<String> = row.get("tags");

    Ok(BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        excerpt: row.get("excerpt"),
        content: row.get("content"),
        author: row.get("author"),
        category: row.get("category"),
        tags: decode_string_list(tags.as_deref())?,
        featured_image: row.get("featured_image"),
        published: row.get("published"),
        published_at: row.get("published_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
