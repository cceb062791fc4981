//! Enrollment API handlers.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use xavier_roster::{create_enrollment, list_enrollments, Enrollment, EnrollmentBase};

/// Handler for `POST /enrollments/`.
///
/// Responds `409 Conflict` when the student or course does not exist; no
/// row is written in that case.
pub async fn create_enrollment_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<EnrollmentBase>, JsonRejection>,
) -> Result<Json<Enrollment>, ApiError> {
    let Json(base) = payload?;
    let enrollment = with_connection(state, move |conn| {
        create_enrollment(conn, &base).map_err(|e| {
            if e.is_integrity_violation() {
                tracing::info!(
                    student_id = base.student_id,
                    course_id = base.course_id,
                    reason = %e,
                    "enrollment rejected"
                );
            }
            ApiError::from(e)
        })
    })
    .await?;
    Ok(Json(enrollment))
}

/// Handler for `GET /enrollments/`.
pub async fn list_enrollments_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    let enrollments = with_connection(state, |conn| Ok(list_enrollments(conn)?)).await?;
    Ok(Json(enrollments))
}
