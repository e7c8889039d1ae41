//! SQLite-backed association store.
//!
//! # Responsibility
//! - Map teachers, students and teacher-owned edges onto the classroom schema.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Rosters are read in `position ASC` order, i.e. registration order.
//! - `save_teacher` runs in one immediate transaction and never deletes edges.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::repo::association_store::{AssociationStore, StoreError, StoreResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::collections::BTreeSet;

/// Stays well under SQLite's bound-parameter limit on every build.
const MAX_IN_CLAUSE_PARAMS: usize = 500;

/// Association store over a migrated SQLite connection.
pub struct SqliteAssociationStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAssociationStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is absent.
    pub fn try_new(conn: &'conn mut Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AssociationStore for SqliteAssociationStore<'_> {
    fn find_teacher_by_email(
        &self,
        email: &str,
        with_students: bool,
    ) -> StoreResult<Option<Teacher>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, email FROM teachers WHERE email = ?1;",
                [email],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((teacher_id, stored_email)) = found else {
            return Ok(None);
        };
        let roster = if with_students {
            load_roster(self.conn, teacher_id)?
        } else {
            Vec::new()
        };
        Ok(Some(Teacher::with_students(stored_email, roster)))
    }

    fn find_teachers_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Teacher>> {
        let wanted = distinct(emails);
        let mut teachers = Vec::with_capacity(wanted.len());

        for chunk in wanted.chunks(MAX_IN_CLAUSE_PARAMS) {
            let sql = format!(
                "SELECT id, email FROM teachers WHERE email IN ({}) ORDER BY id ASC;",
                placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(chunk.iter()))?;
            while let Some(row) = rows.next()? {
                let teacher_id: i64 = row.get(0)?;
                let email: String = row.get(1)?;
                let roster = load_roster(self.conn, teacher_id)?;
                teachers.push(Teacher::with_students(email, roster));
            }
        }

        Ok(teachers)
    }

    fn save_teacher(&mut self, teacher: &Teacher) -> StoreResult<Teacher> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT OR IGNORE INTO teachers (email) VALUES (?1);",
            [teacher.email.as_str()],
        )?;
        let teacher_id: i64 = tx.query_row(
            "SELECT id FROM teachers WHERE email = ?1;",
            [teacher.email.as_str()],
            |row| row.get(0),
        )?;
        let mut next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0)
             FROM teacher_students
             WHERE teacher_id = ?1;",
            [teacher_id],
            |row| row.get(0),
        )?;

        for student in teacher.students() {
            tx.execute(
                "INSERT OR IGNORE INTO students (email, suspended) VALUES (?1, ?2);",
                params![student.email.as_str(), bool_to_int(student.suspended)],
            )?;
            let student_id: i64 = tx.query_row(
                "SELECT id FROM students WHERE email = ?1;",
                [student.email.as_str()],
                |row| row.get(0),
            )?;
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO teacher_students (teacher_id, student_id, position)
                 VALUES (?1, ?2, ?3);",
                params![teacher_id, student_id, next_position],
            )?;
            if inserted > 0 {
                next_position += 1;
            }
        }

        tx.commit()?;

        self.find_teacher_by_email(&teacher.email, true)?
            .ok_or_else(|| StoreError::InvalidData("saved teacher missing in read-back".to_string()))
    }

    fn find_students_by_emails(&self, emails: &[String]) -> StoreResult<Vec<Student>> {
        let wanted = distinct(emails);
        let mut students = Vec::with_capacity(wanted.len());

        for chunk in wanted.chunks(MAX_IN_CLAUSE_PARAMS) {
            let sql = format!(
                "SELECT email, suspended FROM students WHERE email IN ({}) ORDER BY id ASC;",
                placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(chunk.iter()))?;
            while let Some(row) = rows.next()? {
                students.push(parse_student_row(row)?);
            }
        }

        Ok(students)
    }

    fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare("SELECT email, suspended FROM students WHERE email = ?1;")?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn save_student(&mut self, student: &Student) -> StoreResult<Student> {
        self.conn.execute(
            "INSERT INTO students (email, suspended) VALUES (?1, ?2)
             ON CONFLICT(email) DO UPDATE SET
                suspended = excluded.suspended,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![student.email.as_str(), bool_to_int(student.suspended)],
        )?;

        self.find_student_by_email(&student.email)?
            .ok_or_else(|| StoreError::InvalidData("saved student missing in read-back".to_string()))
    }

    fn find_teacher_emails_for_student(&self, student_email: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.email
             FROM teacher_students ts
             INNER JOIN teachers t ON t.id = ts.teacher_id
             INNER JOIN students s ON s.id = ts.student_id
             WHERE s.email = ?1
             ORDER BY t.email ASC;",
        )?;
        let mut rows = stmt.query([student_email])?;
        let mut emails = Vec::new();
        while let Some(row) = rows.next()? {
            emails.push(row.get(0)?);
        }
        Ok(emails)
    }
}

fn load_roster(conn: &Connection, teacher_id: i64) -> StoreResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT s.email AS email, s.suspended AS suspended
         FROM teacher_students ts
         INNER JOIN students s ON s.id = ts.student_id
         WHERE ts.teacher_id = ?1
         ORDER BY ts.position ASC, s.id ASC;",
    )?;
    let mut rows = stmt.query([teacher_id])?;
    let mut roster = Vec::new();
    while let Some(row) = rows.next()? {
        roster.push(parse_student_row(row)?);
    }
    Ok(roster)
}

fn parse_student_row(row: &Row<'_>) -> StoreResult<Student> {
    let email: String = row.get("email")?;
    let suspended = match row.get::<_, i64>("suspended")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid suspended value `{other}` in students.suspended"
            )));
        }
    };
    Ok(Student { email, suspended })
}

/// Drops repeated emails while keeping first-seen order.
fn distinct(emails: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    emails
        .iter()
        .map(String::as_str)
        .filter(|email| seen.insert(*email))
        .collect()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    const REQUIRED: &[(&str, &[&str])] = &[
        ("teachers", &["id", "email"]),
        ("students", &["id", "email", "suspended"]),
        ("teacher_students", &["teacher_id", "student_id", "position"]),
    ];

    for &(table, columns) in REQUIRED {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
