//! Course API handlers.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use xavier_roster::{create_course, list_courses, Course, CourseBase};

/// Handler for `POST /courses/`.
pub async fn create_course_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CourseBase>, JsonRejection>,
) -> Result<Json<Course>, ApiError> {
    let Json(base) = payload?;
    let course = with_connection(state, move |conn| Ok(create_course(conn, &base)?)).await?;
    Ok(Json(course))
}

/// Handler for `GET /courses/`.
pub async fn list_courses_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let courses = with_connection(state, |conn| Ok(list_courses(conn)?)).await?;
    Ok(Json(courses))
}
