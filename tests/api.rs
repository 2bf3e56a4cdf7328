//! End-to-end API tests
//!
//! Each test spins up the full router over an in-memory SQLite database,
//! seeds data through the repositories and exercises the HTTP surface.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use portfolio_api::api::{build_router, AppState};
use portfolio_api::db::repositories::{
    BlogPostRepository, ContactRepository, ProjectRepository, SqlxBlogPostRepository,
    SqlxContactRepository, SqlxProjectRepository,
};
use portfolio_api::db::{create_test_pool, migrations, DynDatabasePool};
use portfolio_api::models::{NewBlogPost, NewProject};
use portfolio_api::services::{BlogService, ContactService, ProjectService};

struct TestApp {
    server: TestServer,
    pool: DynDatabasePool,
}

async fn spawn_app() -> TestApp {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        contact_service: Arc::new(ContactService::new(SqlxContactRepository::boxed(
            pool.clone(),
        ))),
        project_service: Arc::new(ProjectService::new(SqlxProjectRepository::boxed(
            pool.clone(),
        ))),
        blog_service: Arc::new(BlogService::new(SqlxBlogPostRepository::boxed(pool.clone()))),
    };

    let app = build_router(state, "http://localhost:3000").expect("Failed to build router");
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp { server, pool }
}

fn project_repo(app: &TestApp) -> SqlxProjectRepository {
    SqlxProjectRepository::new(app.pool.clone())
}

fn blog_repo(app: &TestApp) -> SqlxBlogPostRepository {
    SqlxBlogPostRepository::new(app.pool.clone())
}

fn sample_project(slug: &str, featured: bool) -> NewProject {
    NewProject {
        title: format!("Project {}", slug),
        slug: slug.to_string(),
        description: Some("Sample description".to_string()),
        tech_stack: vec!["Rust".to_string(), "SQLite".to_string()],
        image_url: Some("https://example.com/shot.png".to_string()),
        github_url: Some(format!("https://github.com/example/{}", slug)),
        live_url: None,
        featured,
    }
}

fn sample_post(slug: &str, published: bool, age_hours: i64) -> NewBlogPost {
    NewBlogPost {
        title: format!("Post {}", slug),
        slug: slug.to_string(),
        excerpt: Some("Excerpt".to_string()),
        content: Some("Content".to_string()),
        author: Some("Ada".to_string()),
        category: Some("engineering".to_string()),
        tags: vec!["rust".to_string()],
        featured_image: None,
        published,
        published_at: published.then(|| Utc::now() - Duration::hours(age_hours)),
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_version() {
    let app = spawn_app().await;

    let res = app.server.get("/api/health").await;

    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["version"], "1.0.0");
}

// ============================================================================
// Contact
// ============================================================================

#[tokio::test]
async fn contact_short_name_is_400_naming_field() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "J",
            "email": "jane@example.com",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"], json!(["name"]));
}

#[tokio::test]
async fn contact_invalid_email_is_400_naming_field() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "not-an-email",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["errors"], json!(["email"]));
}

#[tokio::test]
async fn contact_missing_email_is_400_naming_field() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["errors"], json!(["email"]));
}

#[tokio::test]
async fn contact_short_message_is_400_naming_field() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "Too short"
        }))
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["errors"], json!(["message"]));
}

#[tokio::test]
async fn contact_valid_submission_is_201_pending() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    res.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["message"],
        "Thank you! Your message has been sent successfully."
    );
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    // The stored IP never leaks through the transport shape
    assert!(body["data"].get("ip_address").is_none());
}

#[tokio::test]
async fn contact_records_forwarded_ip() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .add_header(
            axum::http::HeaderName::from_static("x-forwarded-for"),
            axum::http::HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        )
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    res.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = res.json();
    let id = body["data"]["id"].as_i64().unwrap();

    let stored = SqlxContactRepository::new(app.pool.clone())
        .get_by_id(id)
        .await
        .unwrap()
        .expect("Contact should be stored");
    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.9"));
}

#[tokio::test]
async fn contact_missing_subject_defaults_to_empty() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "Hello there, I love your portfolio!"
        }))
        .await;

    let body: Value = res.json();
    assert_eq!(body["data"]["subject"], "");
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn projects_featured_filter_and_ordering() {
    let app = spawn_app().await;
    let repo = project_repo(&app);
    repo.create(&sample_project("old-featured", true)).await.unwrap();
    repo.create(&sample_project("plain", false)).await.unwrap();
    repo.create(&sample_project("new-featured", true)).await.unwrap();

    let res = app
        .server
        .get("/api/projects")
        .add_query_param("featured", "true")
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    let projects = body["data"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    // Newest first
    assert_eq!(projects[0]["slug"], "new-featured");
    assert_eq!(projects[1]["slug"], "old-featured");
    assert!(projects.iter().all(|p| p["featured"] == json!(true)));
}

#[tokio::test]
async fn projects_list_defaults_to_all() {
    let app = spawn_app().await;
    let repo = project_repo(&app);
    repo.create(&sample_project("one", false)).await.unwrap();
    repo.create(&sample_project("two", true)).await.unwrap();

    let res = app.server.get("/api/projects").await;

    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn project_missing_slug_is_404() {
    let app = spawn_app().await;

    let res = app.server.get("/api/projects/does-not-exist").await;

    res.assert_status_not_found();
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], "Project not found");
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn project_round_trips_all_fields() {
    let app = spawn_app().await;
    let repo = project_repo(&app);
    repo.create(&sample_project("round-trip", true)).await.unwrap();

    let res = app.server.get("/api/projects/round-trip").await;

    res.assert_status_ok();
    let body: Value = res.json();
    let project = &body["data"];
    assert_eq!(project["title"], "Project round-trip");
    assert_eq!(project["slug"], "round-trip");
    assert_eq!(project["description"], "Sample description");
    assert_eq!(project["tech_stack"], json!(["Rust", "SQLite"]));
    assert_eq!(project["image_url"], "https://example.com/shot.png");
    assert_eq!(project["github_url"], "https://github.com/example/round-trip");
    assert_eq!(project["live_url"], Value::Null);
    assert_eq!(project["featured"], json!(true));
}

// ============================================================================
// Blog
// ============================================================================

#[tokio::test]
async fn blog_pagination_second_page() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    for i in 0..12 {
        repo.create(&sample_post(&format!("post-{:02}", i), true, i))
            .await
            .unwrap();
    }

    let res = app
        .server
        .get("/api/blog")
        .add_query_param("page", "2")
        .add_query_param("limit", "5")
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    let data = &body["data"];
    assert_eq!(data["posts"].as_array().unwrap().len(), 5);
    assert_eq!(data["total"], 12);
    assert_eq!(data["page"], 2);
    assert_eq!(data["limit"], 5);
    assert_eq!(data["total_pages"], 3);
}

#[tokio::test]
async fn blog_list_excludes_drafts() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    repo.create(&sample_post("visible", true, 1)).await.unwrap();
    repo.create(&sample_post("hidden-draft", false, 0)).await.unwrap();

    let res = app.server.get("/api/blog").await;

    res.assert_status_ok();
    let body: Value = res.json();
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "visible");
}

#[tokio::test]
async fn blog_non_numeric_page_is_400_naming_parameter() {
    let app = spawn_app().await;

    let res = app
        .server
        .get("/api/blog")
        .add_query_param("page", "abc")
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"], json!(["page"]));
}

#[tokio::test]
async fn blog_non_numeric_limit_is_400_naming_parameter() {
    let app = spawn_app().await;

    let res = app
        .server
        .get("/api/blog")
        .add_query_param("limit", "-5")
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["errors"], json!(["limit"]));
}

#[tokio::test]
async fn blog_tag_filter_is_exact() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    repo.create(&sample_post("tagged", true, 1)).await.unwrap();
    let mut near_miss = sample_post("near-miss", true, 2);
    near_miss.tags = vec!["rustacean".to_string()];
    repo.create(&near_miss).await.unwrap();

    let res = app
        .server
        .get("/api/blog")
        .add_query_param("tag", "rust")
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "tagged");
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn blog_category_filter() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    repo.create(&sample_post("eng", true, 1)).await.unwrap();
    let mut design = sample_post("design", true, 2);
    design.category = Some("design".to_string());
    repo.create(&design).await.unwrap();

    let res = app
        .server
        .get("/api/blog")
        .add_query_param("category", "design")
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "design");
}

#[tokio::test]
async fn blog_detail_returns_published_post() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    repo.create(&sample_post("readable", true, 1)).await.unwrap();

    let res = app.server.get("/api/blog/readable").await;

    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["data"]["slug"], "readable");
    assert_eq!(body["data"]["published"], json!(true));
}

#[tokio::test]
async fn blog_unpublished_slug_matches_missing_slug() {
    let app = spawn_app().await;
    let repo = blog_repo(&app);
    repo.create(&sample_post("secret-draft", false, 0)).await.unwrap();

    let draft_res = app.server.get("/api/blog/secret-draft").await;
    let missing_res = app.server.get("/api/blog/never-existed").await;

    draft_res.assert_status_not_found();
    missing_res.assert_status_not_found();
    let draft_body: Value = draft_res.json();
    let missing_body: Value = missing_res.json();
    assert_eq!(draft_body, missing_body);
    assert_eq!(draft_body["message"], "Blog post not found");
}
