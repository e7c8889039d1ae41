use classroom_core::db::open_db_in_memory;
use classroom_core::{ServiceError, SqliteAssociationStore, TeacherService};
use std::collections::BTreeSet;

fn emails(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn seeded_service(conn: &mut rusqlite::Connection) -> TeacherService<SqliteAssociationStore<'_>> {
    let store = SqliteAssociationStore::try_new(conn).unwrap();
    let mut service = TeacherService::new(store);
    service
        .register(
            "teacherken@gmail.com",
            &emails(&[
                "commonstudent1@gmail.com",
                "commonstudent2@gmail.com",
                "studentonlyunderken@gmail.com",
            ]),
        )
        .unwrap();
    service
        .register(
            "teacherjoe@gmail.com",
            &emails(&[
                "commonstudent2@gmail.com",
                "studentonlyunderjoe@gmail.com",
                "commonstudent1@gmail.com",
            ]),
        )
        .unwrap();
    service
}

#[test]
fn common_students_follow_first_teacher_order() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let common = service
        .common_students(&emails(&["teacherken@gmail.com", "teacherjoe@gmail.com"]))
        .unwrap();
    assert_eq!(
        common,
        emails(&["commonstudent1@gmail.com", "commonstudent2@gmail.com"])
    );

    let reversed = service
        .common_students(&emails(&["teacherjoe@gmail.com", "teacherken@gmail.com"]))
        .unwrap();
    assert_eq!(
        reversed,
        emails(&["commonstudent2@gmail.com", "commonstudent1@gmail.com"])
    );

    let as_set = |list: &[String]| list.iter().cloned().collect::<BTreeSet<_>>();
    assert_eq!(as_set(&common), as_set(&reversed));
}

#[test]
fn single_teacher_returns_full_roster_in_order() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let students = service
        .common_students(&emails(&["teacherjoe@gmail.com"]))
        .unwrap();
    assert_eq!(
        students,
        emails(&[
            "commonstudent2@gmail.com",
            "studentonlyunderjoe@gmail.com",
            "commonstudent1@gmail.com",
        ])
    );
}

#[test]
fn any_missing_teacher_fails_with_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let service = seeded_service(&mut conn);

    let err = service
        .common_students(&emails(&["teacherken@gmail.com", "nobody@gmail.com"]))
        .unwrap_err();
    assert!(err.is_not_found());
    match err {
        ServiceError::TeachersNotFound(missing) => {
            assert_eq!(missing, emails(&["nobody@gmail.com"]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn disjoint_rosters_yield_empty_result_not_error() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
    let mut service = TeacherService::new(store);
    service
        .register("a@example.com", &emails(&["s1@example.com"]))
        .unwrap();
    service
        .register("b@example.com", &emails(&["s2@example.com"]))
        .unwrap();

    let common = service
        .common_students(&emails(&["a@example.com", "b@example.com"]))
        .unwrap();
    assert!(common.is_empty());
}

#[test]
fn lookup_does_not_create_teachers() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let store = SqliteAssociationStore::try_new(&mut conn).unwrap();
        let service = TeacherService::new(store);
        let err = service
            .common_students(&emails(&["ghost@example.com"]))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    let teachers: i64 = conn
        .query_row("SELECT COUNT(*) FROM teachers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(teachers, 0);
}
