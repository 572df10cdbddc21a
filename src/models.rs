use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Represents a user's canonical identity record stored in the `users` table.
/// The password hash never leaves the repository layer; this struct carries only
/// the fields safe for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    // Primary Key. Opaque identity key referenced by enrollments.
    pub id: Uuid,
    // The user's primary identifier, unique across the system.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    // The RBAC flag: grants access to the /admin route group.
    pub is_admin: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// UserCredentials
///
/// Raw Database Row (Internal Use). Carries the Argon2 password hash needed by the
/// login handler. Never serialized into a response.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// NewUser
///
/// Internal input to `Repository::create_user`. The password has already been
/// hashed by the caller; the repository generates the identity key.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

/// Course
///
/// Represents a catalog entry from the `courses` table. This is the primary data
/// structure returned by both the student and admin facades.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Course {
    pub id: i32,
    pub title: String,
    // Short registrar code, e.g. "EFB101".
    pub code: String,
    pub description: String,
    // Bounded 1..=10, enforced at the boundary and by a CHECK constraint.
    pub credits: i32,
}

/// Enrollment
///
/// Internal structure representing a single row of the `enrollments` join table.
/// The (user_id, course_id) pair is the logical key; `id` is a generated identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: Uuid,
    pub course_id: i32,
    pub enrolled_at: DateTime<Utc>,
}

/// --- Request Payloads (Input Schemas) ---

/// RegisterRequest
///
/// Input payload for the public registration endpoint (POST /auth/register).
/// Registration always creates a non-admin account; admins are provisioned
/// through the admin facade.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !valid_email(&self.email) {
            return Err("a valid email address is required");
        }
        if self.password.len() < 6 {
            return Err("password must be at least 6 characters");
        }
        Ok(())
    }
}

/// LoginRequest
///
/// Input payload for POST /auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// AuthResponse
///
/// Output schema for both identity endpoints: the signed bearer token the client
/// presents on subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
}

/// CreateCourseRequest
///
/// Input payload for submitting a new catalog entry (POST /admin/courses).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateCourseRequest {
    pub title: String,
    pub code: String,
    pub description: String,
    pub credits: i32,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() || self.title.len() > 100 {
            return Err("title must be 1-100 characters");
        }
        if self.code.is_empty() || self.code.len() > 20 {
            return Err("code must be 1-20 characters");
        }
        if self.description.is_empty() || self.description.len() > 500 {
            return Err("description must be 1-500 characters");
        }
        if !(1..=10).contains(&self.credits) {
            return Err("credits must be between 1 and 10");
        }
        Ok(())
    }
}

/// UpdateCourseRequest
///
/// Partial update payload for modifying an existing course (PUT /admin/courses/{id}).
///
/// Uses `Option<T>` for all fields and `#[serde(skip_serializing_if = "Option::is_none")]`
/// so only provided fields are included in the JSON payload and applied to the row.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateCourseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.is_empty() || title.len() > 100 {
                return Err("title must be 1-100 characters");
            }
        }
        if let Some(code) = &self.code {
            if code.is_empty() || code.len() > 20 {
                return Err("code must be 1-20 characters");
            }
        }
        if let Some(description) = &self.description {
            if description.is_empty() || description.len() > 500 {
                return Err("description must be 1-500 characters");
            }
        }
        if let Some(credits) = self.credits {
            if !(1..=10).contains(&credits) {
                return Err("credits must be between 1 and 10");
            }
        }
        Ok(())
    }
}

/// CreateUserRequest
///
/// Input payload for operator-side account provisioning (POST /admin/users).
/// Unlike public registration, this may set the admin flag and display names.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !valid_email(&self.email) {
            return Err("a valid email address is required");
        }
        if self.password.len() < 6 || self.password.len() > 100 {
            return Err("password must be 6-100 characters");
        }
        if self.first_name.is_empty() || self.first_name.len() > 100 {
            return Err("first name must be 1-100 characters");
        }
        if self.last_name.is_empty() || self.last_name.len() > 100 {
            return Err("last name must be 1-100 characters");
        }
        Ok(())
    }
}

/// UpdateUserRequest
///
/// Partial update payload for modifying a profile (PUT /admin/users/{id}).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(email) = &self.email {
            if !valid_email(email) {
                return Err("a valid email address is required");
            }
        }
        if let Some(first_name) = &self.first_name {
            if first_name.is_empty() || first_name.len() > 100 {
                return Err("first name must be 1-100 characters");
            }
        }
        if let Some(last_name) = &self.last_name {
            if last_name.is_empty() || last_name.len() > 100 {
                return Err("last name must be 1-100 characters");
            }
        }
        Ok(())
    }
}

/// AdminEnrollmentRequest
///
/// Input payload for the admin facade's enrollment operations, naming the target
/// user explicitly instead of taking it from the caller's token.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminEnrollmentRequest {
    pub user_id: Uuid,
    pub course_id: i32,
}

/// --- Reporting Schemas (Output) ---

/// EnrolledUser
///
/// One member of a course roster: identity/contact fields joined from `users`
/// plus the enrollment timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct EnrolledUser {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    #[ts(type = "string")]
    pub enrolled_at: DateTime<Utc>,
}

/// CourseSummary
///
/// Output schema for the per-course report (GET /admin/enrollments/course/{id}):
/// course identity fields, the headcount, and the full roster.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CourseSummary {
    pub course_id: i32,
    pub title: String,
    pub code: String,
    pub total_enrollments: i64,
    pub enrolled_users: Vec<EnrolledUser>,
}

/// EnrollmentRecord
///
/// One line of the global enrollment listing (GET /admin/enrollments): the logical
/// key enriched with user and course display fields via a JOIN in the repository.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct EnrollmentRecord {
    pub user_id: Uuid,
    pub course_id: i32,
    pub user_email: String,
    // "First Last", concatenated in the query.
    pub user_name: String,
    pub course_title: String,
    #[ts(type = "string")]
    pub enrolled_at: DateTime<Utc>,
}

/// valid_email
///
/// Minimal structural check: one '@' with non-empty local part and a domain
/// containing a dot. Full RFC validation is deliberately out of scope.
fn valid_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
