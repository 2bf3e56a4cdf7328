//! Contact submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact-form submission
///
/// The sender's IP address is recorded for abuse triage but never
/// serialized in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email address
    pub email: String,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
    /// Client IP address at submission time, if known
    #[serde(skip_serializing, default)]
    pub ip_address: Option<String>,
    /// Processing status (new submissions start as "pending")
    pub status: String,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new contact submission
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_address_not_serialized() {
        let contact = Contact {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: String::new(),
            message: "A message of sufficient length".to_string(),
            ip_address: Some("203.0.113.7".to_string()),
            status: "pending".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("ip_address").is_none());
        assert_eq!(json["status"], "pending");
    }
}
