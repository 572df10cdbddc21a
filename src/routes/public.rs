use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client.
/// The catalog reads expose no per-user state, and the identity endpoints are the
/// gateway into the authenticated surface.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // POST /auth/register
        // Creates a non-admin account and returns the first bearer token.
        .route("/auth/register", post(handlers::register_user))
        // POST /auth/login
        // Exchanges email + password for a bearer token.
        .route("/auth/login", post(handlers::login_user))
        // GET /courses
        // The full catalog, independent of any user's enrollment state.
        .route("/courses", get(handlers::get_courses))
        // GET /courses/{id}
        // Single course lookup; unknown ids are a plain 404.
        .route("/courses/{id}", get(handlers::get_course_details))
}
