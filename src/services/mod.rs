//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories. Each holds
//! its repository behind `Arc<dyn Trait>` so tests can swap in fakes, and
//! reports failures through a per-service error enum.

pub mod blog;
pub mod contact;
pub mod project;

pub use blog::{BlogService, BlogServiceError, PagedPosts, PageParams};
pub use contact::{ContactService, ContactServiceError, SubmitContactInput};
pub use project::{ProjectService, ProjectServiceError};
