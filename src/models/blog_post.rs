//! Blog post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post entry
///
/// Only posts with `published = true` are ever exposed through the public
/// API; drafts exist in storage but are invisible to readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// URL-friendly slug (unique)
    pub slug: String,
    /// Short summary for list views
    pub excerpt: Option<String>,
    /// Full post content
    pub content: Option<String>,
    /// Author display name
    pub author: Option<String>,
    /// Post category
    pub category: Option<String>,
    /// Tags, stored as a JSON array
    #[serde(default)]
    pub tags: Vec<String>,
    /// Header image URL
    pub featured_image: Option<String>,
    /// Whether the post is publicly visible
    #[serde(default)]
    pub published: bool,
    /// Publication timestamp (set when published)
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Optional filters for published-post list queries
///
/// A tag filter matches posts whose tag list contains the exact value;
/// substring matches are not tag matches.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Input for creating a new blog post
#[derive(Debug, Clone, Default)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}
