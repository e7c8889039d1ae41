//! Service-level error taxonomy.

use crate::repo::association_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by classroom use-cases.
///
/// Not-found variants are always distinct from empty results: a teacher with
/// no students yields `Ok(vec![])`, an unknown teacher yields an error.
#[derive(Debug)]
pub enum ServiceError {
    /// Lookup targeted a teacher that does not exist.
    TeacherNotFound(String),
    /// One or more teachers of a multi-teacher lookup do not exist.
    TeachersNotFound(Vec<String>),
    /// Lookup targeted a student that does not exist.
    StudentNotFound(String),
    /// Persistence failure, passed through unchanged.
    Store(StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeacherNotFound(email) => write!(f, "teacher not found: {email}"),
            Self::TeachersNotFound(emails) => {
                write!(f, "one or more teachers not found: {}", emails.join(", "))
            }
            Self::StudentNotFound(email) => write!(f, "student not found: {email}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
