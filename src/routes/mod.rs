/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.

/// Routes accessible to all clients: identity entry points and the read-only
/// course catalog.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware. The student facade:
/// every operation is constrained to the caller's own user id.
pub mod authenticated;

/// Routes restricted to users with the admin flag. The admin facade: operates
/// on explicit user ids and carries the management/reporting surface.
pub mod admin;
