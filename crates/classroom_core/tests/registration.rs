use classroom_core::db::open_db_in_memory;
use classroom_core::{
    AssociationStore, ServiceError, SqliteAssociationStore, Student, TeacherService,
};
use rusqlite::Connection;

fn emails(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn register_creates_teacher_and_students_in_request_order() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut service = TeacherService::new(store);

    service
        .register(
            "teacherken@gmail.com",
            &emails(&["studentjon@gmail.com", "studenthon@gmail.com"]),
        )
        .unwrap();

    let teacher = service
        .store()
        .find_teacher_by_email("teacherken@gmail.com", true)
        .unwrap()
        .unwrap();
    assert_eq!(
        teacher.student_emails(),
        emails(&["studentjon@gmail.com", "studenthon@gmail.com"])
    );
    assert!(teacher.students().iter().all(|student| !student.suspended));
}

#[test]
fn registering_same_pair_twice_keeps_one_edge() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
        let mut service = TeacherService::new(store);
        service
            .register("t@example.com", &emails(&["s1@example.com"]))
            .unwrap();
        service
            .register("t@example.com", &emails(&["s1@example.com"]))
            .unwrap();
    }

    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM teacher_students;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(edges, 1);
}

#[test]
fn overlapping_registrations_merge_without_duplicates() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut service = TeacherService::new(store);

    service
        .register("teacher@x.com", &emails(&["s1@x.com", "s2@x.com"]))
        .unwrap();
    service
        .register("teacher@x.com", &emails(&["s2@x.com", "s3@x.com"]))
        .unwrap();

    let teacher = service
        .store()
        .find_teacher_by_email("teacher@x.com", true)
        .unwrap()
        .unwrap();
    assert_eq!(
        teacher.student_emails(),
        emails(&["s1@x.com", "s2@x.com", "s3@x.com"])
    );
}

#[test]
fn register_links_students_that_already_exist_elsewhere() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut service = TeacherService::new(store);

    service
        .register("t1@example.com", &emails(&["shared@example.com"]))
        .unwrap();
    service
        .register(
            "t2@example.com",
            &emails(&["shared@example.com", "new@example.com"]),
        )
        .unwrap();

    let second = service
        .store()
        .find_teacher_by_email("t2@example.com", true)
        .unwrap()
        .unwrap();
    assert_eq!(
        second.student_emails(),
        emails(&["shared@example.com", "new@example.com"])
    );
    let students = service
        .store()
        .find_students_by_emails(&emails(&["shared@example.com", "new@example.com"]))
        .unwrap();
    assert_eq!(students.len(), 2);
}

#[test]
fn register_does_not_clear_existing_suspension() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut suspended = Student::new("s@example.com");
    suspended.suspend();
    store.save_student(&suspended).unwrap();

    let mut service = TeacherService::new(store);
    service
        .register("t@example.com", &emails(&["s@example.com"]))
        .unwrap();

    let student = service
        .store()
        .find_student_by_email("s@example.com")
        .unwrap()
        .unwrap();
    assert!(student.suspended);
}

#[test]
fn emails_are_case_sensitive_identities() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut service = TeacherService::new(store);

    service
        .register("t@example.com", &emails(&["Student@example.com", "student@example.com"]))
        .unwrap();

    let teacher = service
        .store()
        .find_teacher_by_email("t@example.com", true)
        .unwrap()
        .unwrap();
    assert_eq!(teacher.students().len(), 2);
    assert!(service
        .store()
        .find_teacher_by_email("T@example.com", false)
        .unwrap()
        .is_none());
}

#[test]
fn failed_edge_write_rolls_back_the_whole_registration() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_bad_edge BEFORE INSERT ON teacher_students
         WHEN (SELECT email FROM students WHERE id = NEW.student_id) = 'bad@example.com'
         BEGIN
             SELECT RAISE(ABORT, 'boom');
         END;",
    )
    .unwrap();

    {
        let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
        let mut service = TeacherService::new(store);
        let err = service
            .register(
                "t@example.com",
                &emails(&["good@example.com", "bad@example.com"]),
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(!err.is_not_found());
    }

    assert_eq!(count_rows(&conn, "teachers"), 0);
    assert_eq!(count_rows(&conn, "students"), 0);
    assert_eq!(count_rows(&conn, "teacher_students"), 0);
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
