//! Association store contract.
//!
//! # Responsibility
//! - Define the persistence operations the classroom services consume.
//! - Provide the store-level error type shared by every adapter.
//!
//! # Invariants
//! - Lookups never create entities.
//! - `save_teacher` only adds edges; an edge already stored is left untouched.
//! - `save_teacher` inserts unknown students but never overwrites the
//!   `suspended` flag of a student that already exists.
//!
//! # Concurrency
//! Services issue a read followed by a write without holding a lock in
//! between. Two callers mutating the same teacher or student at the same time
//! can lose an update unless the adapter makes the write atomic. The SQLite
//! adapter inserts edges with `INSERT OR IGNORE` inside an immediate
//! transaction, so concurrent registrations converge to the union of edges.

use crate::db::DbError;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure reported by an association store.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection does not carry the classroom schema.
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Stored rows cannot be turned into a valid model.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "association store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "association store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid association data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed storage of teachers, students and the edges between them.
///
/// Read methods take `&self`; write methods take `&mut self`.
pub trait AssociationStore {
    /// Loads one teacher. The roster is left empty unless `with_students`.
    fn find_teacher_by_email(
        &self,
        email: &str,
        with_students: bool,
    ) -> StoreResult<Option<Teacher>>;

    /// Loads every existing teacher among `emails`, rosters included.
    ///
    /// Missing emails are skipped silently; callers decide whether that is an
    /// error. Result order is unspecified.
    fn find_teachers_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Teacher>>;

    /// Builds an unsaved teacher.
    fn create_teacher(&self, email: &str) -> Teacher {
        Teacher::new(email)
    }

    /// Persists the teacher, any roster students not yet stored, and every
    /// roster edge not yet stored. Returns the teacher as read back.
    fn save_teacher(&mut self, teacher: &Teacher) -> StoreResult<Teacher>;

    /// Loads every existing student among `emails`. Order is unspecified.
    fn find_students_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Student>>;

    /// Builds an unsaved, non-suspended student.
    fn create_student(&self, email: &str) -> Student {
        Student::new(email)
    }

    fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>>;

    /// Inserts or updates one student by email. Returns the stored record.
    fn save_student(&mut self, student: &Student) -> StoreResult<Student>;

    /// Emails of every teacher linked to `student_email`, sorted ascending.
    fn find_teacher_emails_for_student(&self, student_email: &str) -> StoreResult<Vec<String>>;
}

impl<S: AssociationStore + ?Sized> AssociationStore for &mut S {
    fn find_teacher_by_email(
        &self,
        email: &str,
        with_students: bool,
    ) -> StoreResult<Option<Teacher>> {
        (**self).find_teacher_by_email(email, with_students)
    }

    fn find_teachers_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Teacher>> {
        (**self).find_teachers_by_emails(emails)
    }

    fn create_teacher(&self, email: &str) -> Teacher {
        (**self).create_teacher(email)
    }

    fn save_teacher(&mut self, teacher: &Teacher) -> StoreResult<Teacher> {
        (**self).save_teacher(teacher)
    }

    fn find_students_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Student>> {
        (**self).find_students_by_emails(emails)
    }

    fn create_student(&self, email: &str) -> Student {
        (**self).create_student(email)
    }

    fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        (**self).find_student_by_email(email)
    }

    fn save_student(&mut self, student: &Student) -> StoreResult<Student> {
        (**self).save_student(student)
    }

    fn find_teacher_emails_for_student(&self, student_email: &str) -> StoreResult<Vec<String>> {
        (**self).find_teacher_emails_for_student(student_email)
    }
}
