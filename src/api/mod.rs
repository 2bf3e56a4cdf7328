//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the portfolio API:
//! - Health endpoint
//! - Contact form endpoint
//! - Project endpoints
//! - Blog endpoints
//!
//! Handlers reach the services through `AppState`; nothing touches the
//! store directly.

pub mod blog;
pub mod common;
pub mod contact;
pub mod health;
pub mod projects;
pub mod responses;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{BlogService, ContactService, ProjectService};

pub use responses::{ApiError, ApiResponse};

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactService>,
    pub project_service: Arc<ProjectService>,
    pub blog_service: Arc<BlogService>,
}

/// Build the API router with all endpoints
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(contact::router())
        .merge(projects::router())
        .merge(blog::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest("/api", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
