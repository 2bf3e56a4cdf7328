//! Portfolio API - backend for a personal portfolio site

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxBlogPostRepository, SqlxContactRepository, SqlxProjectRepository},
    },
    services::{BlogService, ContactService, ProjectService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting portfolio API...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Wire repositories and services
    let state = AppState {
        contact_service: Arc::new(ContactService::new(SqlxContactRepository::boxed(
            pool.clone(),
        ))),
        project_service: Arc::new(ProjectService::new(SqlxProjectRepository::boxed(
            pool.clone(),
        ))),
        blog_service: Arc::new(BlogService::new(SqlxBlogPostRepository::boxed(pool.clone()))),
    };

    let app = api::build_router(state, &config.server.cors_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
