use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the admin flag: the
/// management surface for courses, users, and enrollments, plus the reporting
/// endpoints.
///
/// Access Control:
/// This router is nested under '/admin' and sits behind the authentication
/// layer; the admin flag itself is checked inside each handler after the
/// request's identity has been resolved.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Course management ---
        // POST /admin/courses — add a catalog entry.
        .route("/courses", post(handlers::create_course))
        // PUT/DELETE /admin/courses/{id} — partial update, or delete.
        // Deletion is refused while any enrollment references the course.
        .route(
            "/courses/{id}",
            put(handlers::update_course).delete(handlers::delete_course),
        )
        // --- User management ---
        // GET /admin/users — list all accounts.
        // POST /admin/users — provision an account (may set the admin flag).
        .route(
            "/users",
            get(handlers::get_all_users).post(handlers::create_user),
        )
        // GET/PUT/DELETE /admin/users/{id} — read, partial update, delete.
        // Deletion is refused while the user holds any enrollment, mirroring
        // the course-side guard.
        .route(
            "/users/{id}",
            get(handlers::get_user_details)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // --- Enrollment management ---
        // POST/DELETE /admin/enrollments — enroll or deregister any user by
        // explicit id; same repository operations as the student facade.
        // GET /admin/enrollments — the global joined listing.
        .route(
            "/enrollments",
            post(handlers::admin_enroll)
                .delete(handlers::admin_deregister)
                .get(handlers::get_all_enrollments),
        )
        // GET /admin/enrollments/course/{course_id} — per-course roster report.
        .route(
            "/enrollments/course/{course_id}",
            get(handlers::get_course_summary),
        )
}
