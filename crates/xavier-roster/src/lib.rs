//! Student, course, and enrollment records for the Xavier Institute.
//!
//! Each entity comes in two shapes: a *base* fieldset supplied by a client
//! when the record is created, and a *stored* record that embeds the base and
//! adds the identity SQLite assigned on insert. Stored records are never
//! updated or deleted.
//!
//! | Entity | Base fields | Table |
//! |--------|-------------|-------|
//! | [`Student`] | `name` | `student` |
//! | [`Course`] | `name` | `course` |
//! | [`Enrollment`] | `student_id`, `course_id` | `enrollment` |
//!
//! Enrollment references are foreign keys. The store rejects an enrollment
//! whose student or course does not exist, and [`create_enrollment`] reports
//! which reference was dangling via [`RosterError::DanglingReference`].
//!
//! All operations take a plain `&rusqlite::Connection`; callers decide where
//! the connection comes from. Foreign keys are only enforced on connections
//! with `PRAGMA foreign_keys = ON`, which `xavier_db::create_pool` sets.

mod error;
mod model;
mod store;

pub use error::RosterError;
pub use model::{Course, CourseBase, Enrollment, EnrollmentBase, EntityKind, Student, StudentBase};
pub use store::{
    create_course, create_enrollment, create_student, list_courses, list_enrollments,
    list_students,
};

#[cfg(test)]
mod tests;
