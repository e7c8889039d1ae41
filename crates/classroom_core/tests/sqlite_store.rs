use classroom_core::db::open_db_in_memory;
use classroom_core::{AssociationStore, SqliteAssociationStore, StoreError, Student, Teacher};
use rusqlite::Connection;

fn emails(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqliteAssociationStore::try_new(&mut conn).err().unwrap();
    assert!(matches!(err, StoreError::MissingRequiredTable("teachers")));
}

#[test]
fn create_helpers_do_not_persist() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();

    let teacher = store.create_teacher("t@example.com");
    let student = store.create_student("s@example.com");
    assert!(teacher.students().is_empty());
    assert!(!student.suspended);

    assert!(store.find_teacher_by_email("t@example.com", false).unwrap().is_none());
    assert!(store.find_student_by_email("s@example.com").unwrap().is_none());
}

#[test]
fn save_teacher_appends_new_edges_after_existing_ones() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqliteAssociationStore::try_new(&mut conn).unwrap();

    let mut teacher = Teacher::new("t@example.com");
    teacher.link_student(Student::new("b@example.com"));
    teacher.link_student(Student::new("a@example.com"));
    store.save_teacher(&teacher).unwrap();

    // A copy that lacks `b` must not drop or reorder stored edges.
    let mut stale = Teacher::new("t@example.com");
    stale.link_student(Student::new("c@example.com"));
    stale.link_student(Student::new("a@example.com"));
    let saved = store.save_teacher(&stale).unwrap();

    assert_eq!(
        saved.student_emails(),
        emails(&["b@example.com", "a@example.com", "c@example.com"])
    );
}

#[test]
fn find_teachers_by_emails_skips_missing_and_repeats() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    store.save_teacher(&Teacher::new("t1@example.com")).unwrap();
    store.save_teacher(&Teacher::new("t2@example.com")).unwrap();

    let found = store
        .find_teachers_by_emails(&emails(&[
            "t1@example.com",
            "missing@example.com",
            "t1@example.com",
        ]))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "t1@example.com");
}

#[test]
fn batch_lookups_handle_more_emails_than_one_statement_binds() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqliteAssociationStore::try_new(&mut conn).unwrap();

    let mut teacher = Teacher::new("t@example.com");
    let all: Vec<String> = (0..1200).map(|idx| format!("s{idx}@example.com")).collect();
    for email in &all {
        teacher.link_student(Student::new(email.as_str()));
    }
    store.save_teacher(&teacher).unwrap();

    let students = store.find_students_by_emails(&all).unwrap();
    assert_eq!(students.len(), 1200);
}

#[test]
fn save_student_updates_suspension_in_place() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqliteAssociationStore::try_new(&mut conn).unwrap();

    store.save_student(&Student::new("s@example.com")).unwrap();
    let mut student = store.find_student_by_email("s@example.com").unwrap().unwrap();
    student.suspend();
    let saved = store.save_student(&student).unwrap();

    assert!(saved.suspended);
    assert_eq!(
        store.find_students_by_emails(&emails(&["s@example.com"])).unwrap(),
        vec![saved]
    );
}

#[test]
fn invalid_suspended_value_is_rejected_on_read() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO students (email, suspended) VALUES ('bad@example.com', 7);",
        [],
    )
    .unwrap();

    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let err = store.find_student_by_email("bad@example.com").unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}
