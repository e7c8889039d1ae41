//! Teacher-side use-cases: registration, common students, notifications.
//!
//! # Responsibility
//! - Merge new registrations into the association without duplicate edges.
//! - Intersect rosters across teachers, anchored to the first named teacher.
//! - Resolve notification recipients from roster plus `@mentions`.
//!
//! # Invariants
//! - Only `register` creates teachers or students.
//! - Lookups fail with a not-found error instead of returning partial data.
//! - Result lists never contain the same email twice.

use crate::model::student::Student;
use crate::repo::association_store::AssociationStore;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::mention::extract_mentions;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Teacher use-case service over an association store.
pub struct TeacherService<S: AssociationStore> {
    store: S,
}

impl<S: AssociationStore> TeacherService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Links every email in `student_emails` to `teacher_email`.
    ///
    /// # Contract
    /// - Unknown teacher and students are created; new students start active.
    /// - Existing edges are kept in place; new ones are appended in request
    ///   order. Repeating a registration is a no-op.
    /// - The teacher and its edges are persisted in one store write.
    pub fn register(
        &mut self,
        teacher_email: &str,
        student_emails: &[String],
    ) -> ServiceResult<()> {
        let started_at = Instant::now();

        let mut teacher = match self.store.find_teacher_by_email(teacher_email, true)? {
            Some(teacher) => teacher,
            None => {
                debug!("event=register module=service status=progress teacher_created=true");
                self.store.create_teacher(teacher_email)
            }
        };

        let requested = distinct(student_emails.iter().map(String::as_str));
        let lookup: Vec<String> = requested.iter().map(|email| email.to_string()).collect();
        let existing: HashMap<String, Student> = self
            .store
            .find_students_by_emails(&lookup)?
            .into_iter()
            .map(|student| (student.email.clone(), student))
            .collect();

        let mut created = 0usize;
        let mut linked = 0usize;
        for email in requested {
            let student = match existing.get(email) {
                Some(student) => student.clone(),
                None => {
                    created += 1;
                    self.store.create_student(email)
                }
            };
            if teacher.link_student(student) {
                linked += 1;
            }
        }

        self.store.save_teacher(&teacher)?;

        info!(
            "event=register module=service status=ok duration_ms={} requested_count={} created_count={} linked_count={}",
            started_at.elapsed().as_millis(),
            student_emails.len(),
            created,
            linked
        );
        Ok(())
    }

    /// Returns students registered under every teacher in `teacher_emails`.
    ///
    /// # Contract
    /// - Order follows the first named teacher's roster.
    /// - Repeated teacher emails count once.
    /// - Fails with `TeachersNotFound` if any named teacher is missing.
    pub fn common_students(&self, teacher_emails: &[String]) -> ServiceResult<Vec<String>> {
        let requested = distinct(teacher_emails.iter().map(String::as_str));
        let lookup: Vec<String> = requested.iter().map(|email| email.to_string()).collect();
        let teachers = self.store.find_teachers_by_emails(&lookup)?;

        if teachers.len() != requested.len() {
            let found: HashSet<&str> = teachers.iter().map(|t| t.email.as_str()).collect();
            let missing: Vec<String> = requested
                .iter()
                .filter(|email| !found.contains(*email))
                .map(|email| email.to_string())
                .collect();
            warn!(
                "event=common_students module=service status=error error_code=teacher_not_found requested_count={} missing_count={}",
                requested.len(),
                missing.len()
            );
            return Err(ServiceError::TeachersNotFound(missing));
        }

        let mut by_email: HashMap<String, _> = teachers
            .into_iter()
            .map(|teacher| (teacher.email.clone(), teacher))
            .collect();
        let mut ordered = requested.iter().filter_map(|email| by_email.remove(*email));

        let Some(anchor) = ordered.next() else {
            return Ok(Vec::new());
        };
        let mut common = anchor.student_emails();
        for teacher in ordered {
            let members: HashSet<&str> = teacher
                .students()
                .iter()
                .map(|student| student.email.as_str())
                .collect();
            common.retain(|email| members.contains(email.as_str()));
        }

        debug!(
            "event=common_students module=service status=ok teacher_count={} student_count={}",
            requested.len(),
            common.len()
        );
        Ok(common)
    }

    /// Resolves who receives a notification from `teacher_email`.
    ///
    /// # Contract
    /// - Active roster students come first, in roster order, followed by
    ///   mentioned emails not already listed, in text order.
    /// - Suspended students are dropped whether they come from the roster or
    ///   from a mention.
    /// - Mentioned emails with no student record are kept.
    /// - Fails with `TeacherNotFound` if the teacher is missing.
    pub fn retrieve_for_notifications(
        &self,
        teacher_email: &str,
        notification: &str,
    ) -> ServiceResult<Vec<String>> {
        let started_at = Instant::now();

        let teacher = self
            .store
            .find_teacher_by_email(teacher_email, true)?
            .ok_or_else(|| ServiceError::TeacherNotFound(teacher_email.to_string()))?;

        let mentioned = extract_mentions(notification);
        let combined = distinct(
            teacher
                .active_students()
                .map(|student| student.email.as_str())
                .chain(mentioned.iter().map(String::as_str)),
        );

        let mentioned_lookup: Vec<String> = distinct(mentioned.iter().map(String::as_str))
            .into_iter()
            .map(str::to_string)
            .collect();
        let mentioned_students = if mentioned_lookup.is_empty() {
            Vec::new()
        } else {
            self.store.find_students_by_emails(&mentioned_lookup)?
        };
        let suspended: HashSet<&str> = mentioned_students
            .iter()
            .filter(|student| student.suspended)
            .map(|student| student.email.as_str())
            .collect();

        let recipients: Vec<String> = combined
            .into_iter()
            .filter(|email| !suspended.contains(email))
            .map(str::to_string)
            .collect();

        info!(
            "event=retrieve_for_notifications module=service status=ok duration_ms={} mention_count={} recipient_count={}",
            started_at.elapsed().as_millis(),
            mentioned.len(),
            recipients.len()
        );
        Ok(recipients)
    }
}

/// Drops repeated emails while keeping first-seen order.
fn distinct<'a>(emails: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    emails
        .into_iter()
        .filter(|email| seen.insert(*email))
        .collect()
}
