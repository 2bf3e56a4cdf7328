//! Project model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: i64,
    /// Project title
    pub title: String,
    /// URL-friendly slug (unique)
    pub slug: String,
    /// Project description
    pub description: Option<String>,
    /// Technologies used, stored as a JSON array
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Screenshot or cover image URL
    pub image_url: Option<String>,
    /// Source repository URL
    pub github_url: Option<String>,
    /// Live deployment URL
    pub live_url: Option<String>,
    /// Whether the project is featured on the landing page
    #[serde(default)]
    pub featured: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}
