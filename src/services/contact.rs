//! Contact service
//!
//! Validates and records contact-form submissions. Validation runs before
//! any database work; the first failing check wins and is reported with the
//! offending field name.

use crate::db::repositories::ContactRepository;
use crate::models::{Contact, NewContact};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Minimum length for the sender name
const MIN_NAME_LEN: usize = 2;

/// Minimum length for the message body
const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| panic!("Invalid email regex: {}", e))
});

/// Error types for contact service operations
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    /// A submission field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ContactServiceError {
    fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Input for a contact-form submission
#[derive(Debug, Clone, Default)]
pub struct SubmitContactInput {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub ip_address: Option<String>,
}

/// Validate a submission, checking fields in a fixed order
///
/// Checks run name, then email, then message; the first failure is returned.
pub fn validate_submission(input: &SubmitContactInput) -> Result<(), ContactServiceError> {
    if input.name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ContactServiceError::validation(
            "name",
            "Name must be at least 2 characters",
        ));
    }

    let email = input.email.trim();
    if email.is_empty() {
        return Err(ContactServiceError::validation("email", "Email is required"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ContactServiceError::validation(
            "email",
            "Invalid email format",
        ));
    }

    if input.message.trim().chars().count() < MIN_MESSAGE_LEN {
        return Err(ContactServiceError::validation(
            "message",
            "Message must be at least 10 characters",
        ));
    }

    Ok(())
}

/// Contact service for handling form submissions
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    /// Create a new contact service
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a submission
    ///
    /// A missing subject is stored as an empty string; new submissions
    /// always start with status "pending".
    pub async fn submit(&self, input: SubmitContactInput) -> Result<Contact, ContactServiceError> {
        validate_submission(&input)?;

        let new_contact = NewContact {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            subject: input
                .subject
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            message: input.message.trim().to_string(),
            ip_address: input.ip_address,
        };

        let contact = self.repo.create(&new_contact).await?;

        tracing::info!(contact_id = contact.id, "Contact submission recorded");

        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxContactRepository;
    use crate::db::{create_test_pool, migrations};
    use proptest::prelude::*;

    fn valid_input() -> SubmitContactInput {
        SubmitContactInput {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: Some("Hello".to_string()),
            message: "A message that is long enough.".to_string(),
            ip_address: None,
        }
    }

    async fn setup_service() -> ContactService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        ContactService::new(SqlxContactRepository::boxed(pool))
    }

    fn assert_validation_field(result: Result<(), ContactServiceError>, expected: &str) {
        match result {
            Err(ContactServiceError::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_short_name_rejected() {
        let mut input = valid_input();
        input.name = "A".to_string();
        assert_validation_field(validate_submission(&input), "name");
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        assert_validation_field(validate_submission(&input), "name");
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["not-an-email", "missing@tld", "@example.com", "a b@c.com"] {
            let mut input = valid_input();
            input.email = email.to_string();
            assert_validation_field(validate_submission(&input), "email");
        }
    }

    #[test]
    fn test_short_message_rejected() {
        let mut input = valid_input();
        input.message = "too short".to_string();
        assert_validation_field(validate_submission(&input), "message");
    }

    #[test]
    fn test_first_failure_wins() {
        // Both name and message are invalid; name is checked first
        let input = SubmitContactInput {
            name: "A".to_string(),
            email: "bad".to_string(),
            subject: None,
            message: "short".to_string(),
            ip_address: None,
        };
        assert_validation_field(validate_submission(&input), "name");
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_submission(&valid_input()).is_ok());
    }

    #[tokio::test]
    async fn test_submit_stores_pending_contact() {
        let service = setup_service().await;

        let contact = service
            .submit(valid_input())
            .await
            .expect("Submission should succeed");

        assert!(contact.id > 0);
        assert_eq!(contact.status, "pending");
    }

    #[tokio::test]
    async fn test_submit_defaults_missing_subject() {
        let service = setup_service().await;
        let mut input = valid_input();
        input.subject = None;

        let contact = service
            .submit(input)
            .await
            .expect("Submission should succeed");

        assert_eq!(contact.subject, "");
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_without_storing() {
        let service = setup_service().await;
        let mut input = valid_input();
        input.email = "nope".to_string();

        let result = service.submit(input).await;

        assert!(matches!(
            result,
            Err(ContactServiceError::Validation { field: "email", .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_names_of_two_or_more_chars_pass(name in "[a-zA-Z]{2,40}") {
            let mut input = valid_input();
            input.name = name;
            prop_assert!(validate_submission(&input).is_ok());
        }

        #[test]
        fn prop_short_messages_always_rejected(message in "[a-z ]{0,9}") {
            let mut input = valid_input();
            input.message = message;
            let rejected = matches!(
                validate_submission(&input),
                Err(ContactServiceError::Validation { field: "message", .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn prop_simple_emails_pass(local in "[a-z0-9]{1,10}", domain in "[a-z0-9]{1,10}") {
            let mut input = valid_input();
            input.email = format!("{}@{}.com", local, domain);
            prop_assert!(validate_submission(&input).is_ok());
        }
    }
}
