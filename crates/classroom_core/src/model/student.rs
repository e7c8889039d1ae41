//! Student domain model.
//!
//! # Invariants
//! - `email` is the identity; two records with the same email are the same student.
//! - `suspended` is independent of teacher membership.

use serde::{Deserialize, Serialize};

/// A student record, identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Case-sensitive unique identity.
    pub email: String,
    /// Excludes the student from notification delivery when `true`.
    pub suspended: bool,
}

impl Student {
    /// Creates an active (non-suspended) student. Not persisted.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            suspended: false,
        }
    }

    /// Marks the student suspended. Calling twice has no further effect.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Returns whether this student should receive notifications.
    pub fn is_active(&self) -> bool {
        !self.suspended
    }
}
