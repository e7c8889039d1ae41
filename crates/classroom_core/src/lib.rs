//! Core domain logic for the classroom association service.
//! This crate is the single source of truth for teacher/student invariants.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::classroom_api::{ApiError, ClassroomApi, STATUS_NO_CONTENT};
pub use api::dto::{
    is_valid_email, CommonStudentsRequest, CommonStudentsResponse, ErrorResponse,
    NotificationRequest, NotificationResponse, OneOrMany, RegisterRequest, SuspendRequest,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::student::Student;
pub use model::teacher::Teacher;
pub use repo::association_store::{AssociationStore, StoreError, StoreResult};
pub use repo::memory_store::InMemoryAssociationStore;
pub use repo::sqlite_store::SqliteAssociationStore;
pub use service::error::{ServiceError, ServiceResult};
pub use service::mention::extract_mentions;
pub use service::student_service::StudentService;
pub use service::teacher_service::TeacherService;

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
