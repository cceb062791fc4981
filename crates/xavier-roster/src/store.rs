//! Insert-and-return and select-all operations.
//!
//! Every operation is a single SQL statement. Inserts use `RETURNING` so the
//! caller gets back exactly what the store persisted.

use rusqlite::{params, Connection, Row};

use crate::error::RosterError;
use crate::model::{
    Course, CourseBase, Enrollment, EnrollmentBase, EntityKind, Student, StudentBase,
};

/// Persists a new student and returns it with its assigned identity.
pub fn create_student(conn: &Connection, base: &StudentBase) -> Result<Student, RosterError> {
    let student = conn.query_row(
        "INSERT INTO student (name) VALUES (?1) RETURNING id, name",
        [&base.name],
        map_row_to_student,
    )?;
    tracing::debug!(student_id = student.id, "student created");
    Ok(student)
}

/// Lists every student in insertion order.
pub fn list_students(conn: &Connection) -> Result<Vec<Student>, RosterError> {
    let mut stmt = conn.prepare("SELECT id, name FROM student ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row_to_student)?;
    let mut students = Vec::new();
    for row in rows {
        students.push(row?);
    }
    Ok(students)
}

/// Persists a new course and returns it with its assigned identity.
pub fn create_course(conn: &Connection, base: &CourseBase) -> Result<Course, RosterError> {
    let course = conn.query_row(
        "INSERT INTO course (name) VALUES (?1) RETURNING id, name",
        [&base.name],
        map_row_to_course,
    )?;
    tracing::debug!(course_id = course.id, "course created");
    Ok(course)
}

/// Lists every course in insertion order.
pub fn list_courses(conn: &Connection) -> Result<Vec<Course>, RosterError> {
    let mut stmt = conn.prepare("SELECT id, name FROM course ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row_to_course)?;
    let mut courses = Vec::new();
    for row in rows {
        courses.push(row?);
    }
    Ok(courses)
}

/// Persists a new enrollment and returns it with its assigned identity.
///
/// # Errors
///
/// Returns [`RosterError::DanglingReference`] if `student_id` or `course_id`
/// does not name an existing row. Nothing is written in that case.
pub fn create_enrollment(
    conn: &Connection,
    base: &EnrollmentBase,
) -> Result<Enrollment, RosterError> {
    let inserted = conn.query_row(
        "INSERT INTO enrollment (student_id, course_id) VALUES (?1, ?2)
         RETURNING id, student_id, course_id",
        params![base.student_id, base.course_id],
        map_row_to_enrollment,
    );

    match inserted {
        Ok(enrollment) => {
            tracing::debug!(
                enrollment_id = enrollment.id,
                student_id = enrollment.base.student_id,
                course_id = enrollment.base.course_id,
                "enrollment created"
            );
            Ok(enrollment)
        }
        Err(e) if is_foreign_key_violation(&e) => Err(locate_dangling_reference(conn, base, e)?),
        Err(e) => Err(e.into()),
    }
}

/// Lists every enrollment in insertion order.
pub fn list_enrollments(conn: &Connection) -> Result<Vec<Enrollment>, RosterError> {
    let mut stmt =
        conn.prepare("SELECT id, student_id, course_id FROM enrollment ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row_to_enrollment)?;
    let mut enrollments = Vec::new();
    for row in rows {
        enrollments.push(row?);
    }
    Ok(enrollments)
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Works out which reference made the insert fail.
///
/// SQLite does not say which foreign key was violated, so both referenced
/// tables are probed. Rows are never deleted, so a reference found missing
/// here was also missing at insert time.
fn locate_dangling_reference(
    conn: &Connection,
    base: &EnrollmentBase,
    violation: rusqlite::Error,
) -> Result<RosterError, RosterError> {
    for (entity, id) in [
        (EntityKind::Student, base.student_id),
        (EntityKind::Course, base.course_id),
    ] {
        if !row_exists(conn, entity, id)? {
            return Ok(RosterError::DanglingReference { entity, id });
        }
    }
    // Both rows exist now; a concurrent insert created the missing one.
    Ok(RosterError::Constraint(violation))
}

fn row_exists(conn: &Connection, entity: EntityKind, id: i64) -> Result<bool, RosterError> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
        entity.table()
    );
    Ok(conn.query_row(&sql, [id], |row| row.get(0))?)
}

fn map_row_to_student(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        base: StudentBase { name: row.get(1)? },
    })
}

fn map_row_to_course(row: &Row) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        base: CourseBase { name: row.get(1)? },
    })
}

fn map_row_to_enrollment(row: &Row) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get(0)?,
        base: EnrollmentBase {
            student_id: row.get(1)?,
            course_id: row.get(2)?,
        },
    })
}
