//! Contact form endpoint

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::common::extract_ip;
use crate::api::responses::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::services::{ContactServiceError, SubmitContactInput};

/// Raw contact form body
///
/// All fields are optional at the parsing stage so that missing values
/// reach the validation layer and come back as field-tagged 400s instead
/// of opaque deserialization failures.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Build the contact router
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

/// POST /api/contact
async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ContactForm>,
) -> Result<Response, ApiError> {
    let input = SubmitContactInput {
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        subject: form.subject,
        message: form.message.unwrap_or_default(),
        ip_address: extract_ip(&headers),
    };

    let contact = state
        .contact_service
        .submit(input)
        .await
        .map_err(|e| match e {
            ContactServiceError::Validation { field, message } => {
                ApiError::validation(field, message)
            }
            ContactServiceError::Internal(err) => {
                ApiError::internal("Failed to submit contact form", err)
            }
        })?;

    Ok(ApiResponse::with_status(
        StatusCode::CREATED,
        contact,
        "Thank you! Your message has been sent successfully.",
    ))
}
