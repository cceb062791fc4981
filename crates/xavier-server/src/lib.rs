//! HTTP surface of the Xavier Institute roster service.

pub mod api;
pub mod api_courses;
pub mod api_enrollments;
pub mod api_students;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use xavier_db::DbPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Builds the application router with all routes.
///
/// Collection routes answer with and without the trailing slash.
pub fn app(state: AppState) -> Router {
    let students = post(api_students::create_student_handler)
        .get(api_students::list_students_handler);
    let courses =
        post(api_courses::create_course_handler).get(api_courses::list_courses_handler);
    let enrollments = post(api_enrollments::create_enrollment_handler)
        .get(api_enrollments::list_enrollments_handler);

    Router::new()
        .route("/", get(api::root_handler))
        .route("/students/", students.clone())
        .route("/students", students)
        .route("/courses/", courses.clone())
        .route("/courses", courses)
        .route("/enrollments/", enrollments.clone())
        .route("/enrollments", enrollments)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
