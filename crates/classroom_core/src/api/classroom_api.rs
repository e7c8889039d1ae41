//! Validated entry points over the classroom services.
//!
//! # Responsibility
//! - Validate request bodies, then delegate to the matching service.
//! - Map failures onto stable status codes for transport adapters.
//!
//! # Invariants
//! - Invalid requests never reach the store.
//! - Not-found and store failures stay distinguishable.

use crate::api::dto::{
    CommonStudentsRequest, CommonStudentsResponse, ErrorResponse, NotificationRequest,
    NotificationResponse, RegisterRequest, SuspendRequest,
};
use crate::repo::association_store::AssociationStore;
use crate::service::error::ServiceError;
use crate::service::student_service::StudentService;
use crate::service::teacher_service::TeacherService;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Status reported for requests that succeed without a body.
pub const STATUS_NO_CONTENT: u16 = 204;

/// Boundary error: bad input, or a use-case failure.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Service(ServiceError),
}

impl ApiError {
    /// HTTP-style status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Service(err) if err.is_not_found() => 404,
            Self::Service(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid request: {message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn validated(operation: &str, result: Result<(), String>) -> Result<(), ApiError> {
    result.map_err(|message| {
        warn!("event={operation} module=api status=error error_code=validation_failed");
        ApiError::Validation(message)
    })
}

/// Single entry point for every classroom operation.
///
/// Owns one store; each call borrows it for the duration of one use-case.
pub struct ClassroomApi<S: AssociationStore> {
    store: S,
}

impl<S: AssociationStore> ClassroomApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn register(&mut self, request: &RegisterRequest) -> Result<(), ApiError> {
        validated("register", request.validate())?;
        TeacherService::new(&mut self.store).register(&request.teacher, &request.students)?;
        Ok(())
    }

    pub fn common_students(
        &mut self,
        request: &CommonStudentsRequest,
    ) -> Result<CommonStudentsResponse, ApiError> {
        validated("common_students", request.validate())?;
        let students =
            TeacherService::new(&mut self.store).common_students(&request.teacher.to_vec())?;
        Ok(CommonStudentsResponse { students })
    }

    pub fn retrieve_for_notifications(
        &mut self,
        request: &NotificationRequest,
    ) -> Result<NotificationResponse, ApiError> {
        validated("retrieve_for_notifications", request.validate())?;
        let recipients = TeacherService::new(&mut self.store)
            .retrieve_for_notifications(&request.teacher, &request.notification)?;
        Ok(NotificationResponse { recipients })
    }

    pub fn suspend(&mut self, request: &SuspendRequest) -> Result<(), ApiError> {
        validated("suspend", request.validate())?;
        StudentService::new(&mut self.store).suspend(&request.student)?;
        Ok(())
    }
}
