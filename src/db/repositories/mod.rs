//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the storage operations for one entity.

pub mod blog_post;
pub mod contact;
pub mod project;

pub use blog_post::{BlogPostRepository, SqlxBlogPostRepository};
pub use contact::{ContactRepository, SqlxContactRepository};
pub use project::{ProjectRepository, SqlxProjectRepository};

use anyhow::{Context, Result};

/// Encode a string list as a JSON array for storage
pub(crate) fn encode_string_list(list: &[String]) -> Result<String> {
    serde_json::to_string(list).context("Failed to encode string list as JSON")
}

/// Decode a JSON array column into a string list
///
/// NULL and empty columns decode as an empty list.
pub(crate) fn decode_string_list(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        Some(s) if !s.trim().is_empty() => {
            serde_json::from_str(s).with_context(|| format!("Invalid JSON list column: {}", s))
        }
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_string_list() {
        let list = vec!["rust".to_string(), "axum".to_string()];
        let encoded = encode_string_list(&list).unwrap();
        let decoded = decode_string_list(Some(&encoded)).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_decode_null_column() {
        assert!(decode_string_list(None).unwrap().is_empty());
        assert!(decode_string_list(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_json_is_error() {
        assert!(decode_string_list(Some("not json")).is_err());
    }
}
