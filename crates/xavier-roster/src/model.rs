//! Base and stored record shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record kinds the roster stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A student.
    Student,
    /// A course.
    Course,
    /// A student's enrollment in a course.
    Enrollment,
}

impl EntityKind {
    /// Returns the table backing this entity.
    pub fn table(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Fields a client supplies to create a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentBase {
    /// Display name.
    pub name: String,
}

/// A persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identity assigned by the store.
    pub id: i64,
    /// The fields the student was created with.
    #[serde(flatten)]
    pub base: StudentBase,
}

/// Fields a client supplies to create a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBase {
    /// Display name.
    pub name: String,
}

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Identity assigned by the store.
    pub id: i64,
    /// The fields the course was created with.
    #[serde(flatten)]
    pub base: CourseBase,
}

/// Fields a client supplies to enroll a student in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentBase {
    /// Must reference an existing [`Student`] id.
    pub student_id: i64,
    /// Must reference an existing [`Course`] id.
    pub course_id: i64,
}

/// A persisted enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Identity assigned by the store.
    pub id: i64,
    /// The references the enrollment was created with.
    #[serde(flatten)]
    pub base: EnrollmentBase,
}
