//! Unit tests for roster persistence.

use rusqlite::Connection;
use std::collections::HashSet;

use crate::error::RosterError;
use crate::model::{CourseBase, EnrollmentBase, EntityKind, Student, StudentBase};
use crate::store::{
    create_course, create_enrollment, create_student, list_courses, list_enrollments,
    list_students,
};

/// Creates an in-memory SQLite database with the schema applied and foreign
/// keys enforced, as pooled connections have them.
fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("should enable foreign keys");
    xavier_db::run_migrations(&conn).expect("migrations should succeed");
    conn
}

fn student(name: &str) -> StudentBase {
    StudentBase {
        name: name.to_string(),
    }
}

fn course(name: &str) -> CourseBase {
    CourseBase {
        name: name.to_string(),
    }
}

fn enrollment_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM enrollment", [], |row| row.get(0))
        .expect("should count enrollments")
}

// ── students and courses ─────────────────────────────────────────────

#[test]
fn create_student_assigns_identity() {
    let conn = setup_db();

    let jean = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    assert_eq!(jean.id, 1);
    assert_eq!(jean.base.name, "Jean Grey");
}

#[test]
fn student_identities_are_unique_and_increasing() {
    let conn = setup_db();

    let names = ["Scott Summers", "Ororo Munroe", "Logan", "Kitty Pryde", "Scott Summers"];
    let created: Vec<Student> = names
        .iter()
        .map(|n| create_student(&conn, &student(n)).expect("create student failed"))
        .collect();

    let ids: HashSet<i64> = created.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), names.len(), "duplicate names still get distinct ids");
    assert!(created.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn list_students_returns_every_created_record() {
    let conn = setup_db();
    assert!(list_students(&conn).expect("list failed").is_empty());

    let mut created = Vec::new();
    for name in ["Hank McCoy", "Bobby Drake", "Warren Worthington"] {
        created.push(create_student(&conn, &student(name)).expect("create failed"));
    }

    let listed = list_students(&conn).expect("list failed");
    assert_eq!(listed, created);
}

#[test]
fn list_is_stable_without_intervening_writes() {
    let conn = setup_db();
    create_course(&conn, &course("Telepathy 101")).expect("create failed");
    create_course(&conn, &course("Flight Theory")).expect("create failed");

    let first = list_courses(&conn).expect("first list failed");
    let second = list_courses(&conn).expect("second list failed");
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn students_and_courses_number_independently() {
    let conn = setup_db();

    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");
    assert_eq!(s.id, 1);
    assert_eq!(c.id, 1);
    assert_eq!(c.base.name, "Telepathy 101");
}

#[test]
fn empty_name_is_stored_as_given() {
    let conn = setup_db();
    let s = create_student(&conn, &student("")).expect("create student failed");
    assert_eq!(s.base.name, "");
}

// ── enrollments ──────────────────────────────────────────────────────

#[test]
fn create_enrollment_links_existing_rows() {
    let conn = setup_db();
    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");

    let e = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: s.id,
            course_id: c.id,
        },
    )
    .expect("create enrollment failed");

    assert_eq!(e.id, 1);
    assert_eq!(e.base.student_id, s.id);
    assert_eq!(e.base.course_id, c.id);
    assert_eq!(list_enrollments(&conn).expect("list failed"), vec![e]);
}

#[test]
fn enrollment_with_missing_student_is_rejected() {
    let conn = setup_db();
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");

    let err = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: 99,
            course_id: c.id,
        },
    )
    .unwrap_err();

    match err {
        RosterError::DanglingReference { entity, id } => {
            assert_eq!(entity, EntityKind::Student);
            assert_eq!(id, 99);
        }
        other => panic!("expected DanglingReference, got {other:?}"),
    }
    assert_eq!(enrollment_count(&conn), 0, "no enrollment row should persist");
}

#[test]
fn enrollment_with_missing_course_is_rejected() {
    let conn = setup_db();
    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");

    let err = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: s.id,
            course_id: 7,
        },
    )
    .unwrap_err();

    assert!(err.is_integrity_violation());
    assert_eq!(err.to_string(), "course 7 does not exist");
    assert_eq!(enrollment_count(&conn), 0);
}

#[test]
fn enrollment_with_both_missing_reports_student_first() {
    let conn = setup_db();

    let err = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: 5,
            course_id: 6,
        },
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "student 5 does not exist");
    assert_eq!(enrollment_count(&conn), 0);
}

#[test]
fn rejected_enrollment_does_not_consume_an_identity_visible_to_clients() {
    let conn = setup_db();
    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");

    create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: 99,
            course_id: c.id,
        },
    )
    .unwrap_err();

    let e = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: s.id,
            course_id: c.id,
        },
    )
    .expect("create enrollment failed");
    assert_eq!(e.id, 1);
    assert_eq!(list_enrollments(&conn).expect("list failed").len(), 1);
}

#[test]
fn duplicate_enrollments_are_distinct_records() {
    let conn = setup_db();
    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");
    let base = EnrollmentBase {
        student_id: s.id,
        course_id: c.id,
    };

    let first = create_enrollment(&conn, &base).expect("first enrollment failed");
    let second = create_enrollment(&conn, &base).expect("second enrollment failed");
    assert_ne!(first.id, second.id);
}

#[test]
fn database_errors_are_not_integrity_violations() {
    let conn = Connection::open_in_memory().expect("should open in-memory db");

    let err = list_students(&conn).unwrap_err();
    assert!(matches!(err, RosterError::Database(_)));
    assert!(!err.is_integrity_violation());
}

// ── wire shapes ──────────────────────────────────────────────────────

#[test]
fn stored_records_serialize_flat() {
    let conn = setup_db();
    let s = create_student(&conn, &student("Jean Grey")).expect("create student failed");
    let c = create_course(&conn, &course("Telepathy 101")).expect("create course failed");
    let e = create_enrollment(
        &conn,
        &EnrollmentBase {
            student_id: s.id,
            course_id: c.id,
        },
    )
    .expect("create enrollment failed");

    assert_eq!(
        serde_json::to_value(&s).expect("serialize student"),
        serde_json::json!({"id": 1, "name": "Jean Grey"})
    );
    assert_eq!(
        serde_json::to_value(&e).expect("serialize enrollment"),
        serde_json::json!({"id": 1, "student_id": 1, "course_id": 1})
    );
}

#[test]
fn base_rejects_mistyped_fields() {
    assert!(serde_json::from_str::<StudentBase>(r#"{"name": 42}"#).is_err());
    assert!(serde_json::from_str::<StudentBase>(r#"{}"#).is_err());
    assert!(
        serde_json::from_str::<EnrollmentBase>(r#"{"student_id": "1", "course_id": 1}"#).is_err()
    );
    assert!(serde_json::from_str::<EnrollmentBase>(r#"{"student_id": 1}"#).is_err());
}
