//! Domain model for the teacher/student association.
//!
//! # Responsibility
//! - Define the two entity kinds and the teacher-owned edge list.
//!
//! # Invariants
//! - Every entity is identified by its email, unique within its own kind.
//! - Students hold no back-pointer to teachers; reverse lookup is a store query.

pub mod student;
pub mod teacher;
