//! Teacher domain model.
//!
//! # Responsibility
//! - Own the teacher side of the teacher/student association.
//! - Keep the student roster ordered by registration time.
//!
//! # Invariants
//! - `students` never contains two entries with the same email.
//! - Edges are only ever added; nothing here removes a student.

use crate::model::student::Student;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A teacher together with its registered students.
///
/// The roster is a snapshot of the store at load time. Students carry their
/// suspension flag so notification resolution needs no extra lookup for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TeacherRecord")]
pub struct Teacher {
    /// Case-sensitive unique identity.
    pub email: String,
    students: Vec<Student>,
    /// Emails in `students`; kept in lockstep with the roster.
    #[serde(skip_serializing)]
    linked: HashSet<String>,
}

#[derive(Deserialize)]
struct TeacherRecord {
    email: String,
    #[serde(default)]
    students: Vec<Student>,
}

impl From<TeacherRecord> for Teacher {
    fn from(record: TeacherRecord) -> Self {
        Self::with_students(record.email, record.students)
    }
}

impl Teacher {
    /// Creates a teacher with an empty roster. Not persisted.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            students: Vec::new(),
            linked: HashSet::new(),
        }
    }

    /// Rebuilds a teacher from stored parts, dropping repeated emails.
    pub fn with_students(email: impl Into<String>, students: Vec<Student>) -> Self {
        let mut teacher = Self::new(email);
        teacher.students.reserve(students.len());
        for student in students {
            teacher.link_student(student);
        }
        teacher
    }

    /// Students in registration order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Student emails in registration order.
    pub fn student_emails(&self) -> Vec<String> {
        self.students
            .iter()
            .map(|student| student.email.clone())
            .collect()
    }

    /// Non-suspended students in registration order.
    pub fn active_students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|student| student.is_active())
    }

    /// Whether `email` is already on the roster.
    pub fn has_student(&self, email: &str) -> bool {
        self.linked.contains(email)
    }

    /// Appends `student` to the roster unless already linked.
    ///
    /// Returns `true` when a new edge was added.
    pub fn link_student(&mut self, student: Student) -> bool {
        if !self.linked.insert(student.email.clone()) {
            return false;
        }
        self.students.push(student);
        true
    }
}
