//! Common API utilities shared across endpoints

use axum::http::HeaderMap;

use crate::api::responses::ApiError;

/// Parse a numeric query parameter that arrives as a raw string
///
/// A missing parameter falls back to the default; a present but
/// non-numeric value is a 400 naming the parameter.
pub fn parse_numeric_param(
    name: &'static str,
    raw: Option<&str>,
    default: u32,
) -> Result<u32, ApiError> {
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse::<u32>().map_err(|_| {
            ApiError::validation(
                name,
                format!("Parameter '{}' must be a non-negative integer", name),
            )
        }),
    }
}

/// Extract the client IP from proxy headers
///
/// Prefers the first entry of `x-forwarded-for`, then `x-real-ip`.
pub fn extract_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}
