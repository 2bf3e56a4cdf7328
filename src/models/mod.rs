//! Data models
//!
//! Entity types for the three content domains, plus the input types used
//! when creating records. JSON list columns (`tech_stack`, `tags`) are
//! exposed as `Vec<String>` here; the repositories handle the encoding.

pub mod blog_post;
pub mod contact;
pub mod project;

pub use blog_post::{BlogFilter, BlogPost, NewBlogPost};
pub use contact::{Contact, NewContact};
pub use project::{NewProject, Project};
