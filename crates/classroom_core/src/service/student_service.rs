//! Student-side use-cases: suspension and reverse lookup.

use crate::repo::association_store::AssociationStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Student use-case service over an association store.
pub struct StudentService<S: AssociationStore> {
    store: S,
}

impl<S: AssociationStore> StudentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Marks an existing student suspended.
    ///
    /// Suspending twice succeeds without further change. Edges are kept.
    pub fn suspend(&mut self, student_email: &str) -> ServiceResult<()> {
        let Some(mut student) = self.store.find_student_by_email(student_email)? else {
            warn!("event=suspend module=service status=error error_code=student_not_found");
            return Err(ServiceError::StudentNotFound(student_email.to_string()));
        };

        if student.suspended {
            info!("event=suspend module=service status=ok changed=false");
            return Ok(());
        }

        student.suspend();
        self.store.save_student(&student)?;
        info!("event=suspend module=service status=ok changed=true");
        Ok(())
    }

    /// Emails of teachers the student is registered under, sorted.
    pub fn teachers_of(&self, student_email: &str) -> ServiceResult<Vec<String>> {
        if self.store.find_student_by_email(student_email)?.is_none() {
            return Err(ServiceError::StudentNotFound(student_email.to_string()));
        }
        Ok(self.store.find_teacher_emails_for_student(student_email)?)
    }
}
