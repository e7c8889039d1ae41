//! In-memory association store.
//!
//! Two keyed collections plus a teacher-owned adjacency list. No durability;
//! intended for tests and embedders that keep state elsewhere.

use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::repo::association_store::{AssociationStore, StoreError, StoreResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssociationStore {
    /// Teacher email -> student emails in registration order.
    edges: BTreeMap<String, Vec<String>>,
    /// Student email -> suspended flag.
    students: BTreeMap<String, bool>,
}

impl InMemoryAssociationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (teacher, student) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    fn load_teacher(&self, email: &str, roster: &[String]) -> StoreResult<Teacher> {
        let students = roster
            .iter()
            .map(|student_email| {
                self.students
                    .get(student_email)
                    .map(|&suspended| Student {
                        email: student_email.clone(),
                        suspended,
                    })
                    .ok_or_else(|| {
                        StoreError::InvalidData(format!(
                            "edge from `{email}` points at unknown student"
                        ))
                    })
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Teacher::with_students(email, students))
    }
}

impl AssociationStore for InMemoryAssociationStore {
    fn find_teacher_by_email(
        &self,
        email: &str,
        with_students: bool,
    ) -> StoreResult<Option<Teacher>> {
        match self.edges.get(email) {
            Some(_) if !with_students => Ok(Some(Teacher::new(email))),
            Some(roster) => self.load_teacher(email, roster).map(Some),
            None => Ok(None),
        }
    }

    fn find_teachers_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Teacher>> {
        // Iterating the map keeps results unique even if `emails` repeats.
        self.edges
            .iter()
            .filter(|(email, _)| emails.contains(*email))
            .map(|(email, roster)| self.load_teacher(email, roster))
            .collect()
    }

    fn save_teacher(&mut self, teacher: &Teacher) -> StoreResult<Teacher> {
        for student in teacher.students() {
            self.students
                .entry(student.email.clone())
                .or_insert(student.suspended);
        }

        let roster = self.edges.entry(teacher.email.clone()).or_default();
        for student in teacher.students() {
            if !roster.contains(&student.email) {
                roster.push(student.email.clone());
            }
        }

        let roster = &self.edges[&teacher.email];
        self.load_teacher(&teacher.email, roster)
    }

    fn find_students_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Student>> {
        Ok(self
            .students
            .iter()
            .filter(|(email, _)| emails.contains(*email))
            .map(|(email, &suspended)| Student {
                email: email.clone(),
                suspended,
            })
            .collect())
    }

    fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        Ok(self.students.get(email).map(|&suspended| Student {
            email: email.to_string(),
            suspended,
        }))
    }

    fn save_student(&mut self, student: &Student) -> StoreResult<Student> {
        self.students.insert(student.email.clone(), student.suspended);
        Ok(student.clone())
    }

    fn find_teacher_emails_for_student(&self, student_email: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .edges
            .iter()
            .filter(|(_, roster)| roster.iter().any(|email| email == student_email))
            .map(|(teacher_email, _)| teacher_email.clone())
            .collect())
    }
}
