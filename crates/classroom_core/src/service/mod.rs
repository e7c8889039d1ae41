//! Classroom use-case services.
//!
//! # Responsibility
//! - Orchestrate association store calls into registration, lookup,
//!   notification and suspension use-cases.
//! - Stay storage-agnostic: every service is generic over `AssociationStore`.

pub mod error;
pub mod mention;
pub mod student_service;
pub mod teacher_service;
