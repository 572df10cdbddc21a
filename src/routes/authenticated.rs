use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any user who has passed the authentication
/// layer. This is the student facade of the enrollment component: the user id
/// for every operation comes from the caller's resolved token, never from the
/// request, so a student can only act on their own enrollments.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // Retrieves the currently authenticated user's profile.
        .route("/me", get(handlers::get_me))
        // POST /enrollments/enroll/{course_id}
        // Enrolls the caller. A repeat attempt is a 409, never a second row.
        .route("/enrollments/enroll/{course_id}", post(handlers::enroll))
        // DELETE /enrollments/deregister/{course_id}
        // Removes the caller's enrollment; 404 when none exists.
        .route(
            "/enrollments/deregister/{course_id}",
            delete(handlers::deregister),
        )
        // GET /enrollments/my-courses
        // The caller's enrolled courses.
        .route("/enrollments/my-courses", get(handlers::get_my_courses))
        // GET /enrollments/available-courses
        // Catalog minus enrolled: the complement of /my-courses.
        .route(
            "/enrollments/available-courses",
            get(handlers::get_available_courses),
        )
}
