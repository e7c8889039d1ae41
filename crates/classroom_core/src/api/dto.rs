//! Request/response shapes for the classroom boundary.
//!
//! # Responsibility
//! - Describe the JSON bodies exchanged with callers.
//! - Validate request syntax before any store access.
//!
//! # Invariants
//! - `validate()` never touches storage.
//! - Response field names (`students`, `recipients`, `message`) are stable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Returns whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn require_email(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if !is_valid_email(value) {
        return Err(format!("{field} must be a valid email, got `{value}`"));
    }
    Ok(())
}

fn require_emails(field: &str, values: &[String]) -> Result<(), String> {
    if values.is_empty() {
        return Err(format!("{field} must contain at least one email"));
    }
    values
        .iter()
        .try_for_each(|value| require_email(field, value))
}

/// Body of a registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub teacher: String,
    pub students: Vec<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_email("teacher", &self.teacher)?;
        require_emails("students", &self.students)
    }
}

/// A single value or a list; query strings repeat keys for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

/// Body of a common-students query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStudentsRequest {
    pub teacher: OneOrMany,
}

impl CommonStudentsRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_emails("teacher", &self.teacher.to_vec())
    }
}

/// Body of a notification-recipient request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub teacher: String,
    pub notification: String,
}

impl NotificationRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_email("teacher", &self.teacher)?;
        if self.notification.is_empty() {
            return Err("notification must not be empty".to_string());
        }
        Ok(())
    }
}

/// Body of a suspension request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspendRequest {
    pub student: String,
}

impl SuspendRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_email("student", &self.student)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
