//! Student API handlers.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use xavier_roster::{create_student, list_students, Student, StudentBase};

/// Handler for `POST /students/`.
pub async fn create_student_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<StudentBase>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let Json(base) = payload?;
    let student = with_connection(state, move |conn| Ok(create_student(conn, &base)?)).await?;
    Ok(Json(student))
}

/// Handler for `GET /students/`.
pub async fn list_students_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = with_connection(state, |conn| Ok(list_students(conn)?)).await?;
    Ok(Json(students))
}
