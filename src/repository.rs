use crate::models::{
    Course, CourseSummary, CreateCourseRequest, EnrolledUser, Enrollment, EnrollmentRecord,
    NewUser, UpdateCourseRequest, UpdateUserRequest, User, UserCredentials,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// EnrollOutcome
///
/// Result of an enroll attempt. `AlreadyEnrolled` is a distinguishable outcome,
/// not an error: the store is left exactly as it was, with the one existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// A new enrollment row was inserted.
    Enrolled,
    /// The (user, course) pair already had an active enrollment.
    AlreadyEnrolled,
    /// The referenced user or course does not exist.
    NotFound,
}

/// DeleteOutcome
///
/// Result of deleting a course or user. `Blocked` means at least one enrollment
/// still references the target; the guard applies symmetrically to both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Blocked,
    NotFound,
}

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the
/// single enrollment-repository abstraction consumed by both facades: the
/// student-facing handlers pass their own token-resolved user id, the admin
/// handlers pass an explicit one, and both hit the same methods so an enrollment
/// made through one surface is visible and reversible through the other.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Catalog ---
    async fn list_courses(&self) -> Vec<Course>;
    async fn get_course(&self, id: i32) -> Option<Course>;

    // --- Enrollment (shared by both facades) ---
    // Atomic insert-if-absent on the (user_id, course_id) logical key.
    async fn enroll(&self, user_id: Uuid, course_id: i32) -> EnrollOutcome;
    // Returns true if a row was removed, false if no such enrollment existed.
    async fn deregister(&self, user_id: Uuid, course_id: i32) -> bool;
    async fn enrolled_courses(&self, user_id: Uuid) -> Vec<Course>;
    // Catalog minus the user's enrolled set, computed as a set difference over
    // enrolled course ids rather than a negated join.
    async fn available_courses(&self, user_id: Uuid) -> Vec<Course>;

    // --- Course administration ---
    async fn create_course(&self, req: CreateCourseRequest) -> Option<Course>;
    // Partial update via COALESCE; None if the course does not exist.
    async fn update_course(&self, id: i32, req: UpdateCourseRequest) -> Option<Course>;
    async fn delete_course(&self, id: i32) -> DeleteOutcome;

    // --- User administration / identity ---
    // None means the email is already registered.
    async fn create_user(&self, user: NewUser) -> Option<User>;
    async fn get_user(&self, id: Uuid) -> Option<User>;
    // Lookup for the login handler; includes the stored password hash.
    async fn find_credentials(&self, email: &str) -> Option<UserCredentials>;
    async fn list_users(&self) -> Vec<User>;
    async fn update_user(&self, id: Uuid, req: UpdateUserRequest) -> Option<User>;
    async fn delete_user(&self, id: Uuid) -> DeleteOutcome;

    // --- Reporting ---
    async fn course_summary(&self, course_id: i32) -> Option<CourseSummary>;
    async fn list_enrollments(&self) -> Vec<EnrollmentRecord>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

const COURSE_COLUMNS: &str = "id, title, code, description, credits";
const USER_COLUMNS: &str = "id, email, first_name, last_name, is_admin, created_at";

/// Matches the Postgres error class raised when an insert or delete trips a
/// foreign-key constraint (unknown enroll target, delete of a referenced row).
fn fk_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation)
}

fn unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation)
}

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
/// The enrollment invariant (at most one row per (user_id, course_id)) is held by
/// the table's UNIQUE constraint, and the delete guards by RESTRICT foreign keys,
/// so no application-level pre-check races can violate them.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_courses(&self) -> Vec<Course> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY id");
        sqlx::query_as::<_, Course>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_courses error: {:?}", e);
                vec![]
            })
    }

    async fn get_course(&self, id: i32) -> Option<Course> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_course error: {:?}", e);
                None
            })
    }

    /// enroll
    ///
    /// Inserts the enrollment with `ON CONFLICT DO NOTHING` so the uniqueness
    /// check and the insert are one atomic statement. `rows_affected() == 0`
    /// means the row already existed; a foreign-key violation means the user or
    /// course id does not resolve.
    async fn enroll(&self, user_id: Uuid, course_id: i32) -> EnrollOutcome {
        let result = sqlx::query(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) if res.rows_affected() > 0 => EnrollOutcome::Enrolled,
            Ok(_) => EnrollOutcome::AlreadyEnrolled,
            Err(e) if fk_violation(&e) => EnrollOutcome::NotFound,
            Err(e) => {
                tracing::error!("enroll error: {:?}", e);
                EnrollOutcome::NotFound
            }
        }
    }

    async fn deregister(&self, user_id: Uuid, course_id: i32) -> bool {
        match sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("deregister error: {:?}", e);
                false
            }
        }
    }

    async fn enrolled_courses(&self, user_id: Uuid) -> Vec<Course> {
        sqlx::query_as::<_, Course>(
            "SELECT c.id, c.title, c.code, c.description, c.credits \
             FROM enrollments e JOIN courses c ON e.course_id = c.id \
             WHERE e.user_id = $1 ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("enrolled_courses error: {:?}", e);
            vec![]
        })
    }

    /// available_courses
    ///
    /// Two-step set difference: fetch the user's enrolled course ids, then select
    /// every catalog row whose id is not among them.
    async fn available_courses(&self, user_id: Uuid) -> Vec<Course> {
        let enrolled: Vec<i32> =
            sqlx::query_scalar("SELECT course_id FROM enrollments WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("available_courses id fetch error: {:?}", e);
                    vec![]
                });

        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id <> ALL($1) ORDER BY id");
        sqlx::query_as::<_, Course>(&sql)
            .bind(enrolled)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("available_courses error: {:?}", e);
                vec![]
            })
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Option<Course> {
        let sql = format!(
            "INSERT INTO courses (title, code, description, credits) \
             VALUES ($1, $2, $3, $4) RETURNING {COURSE_COLUMNS}"
        );
        match sqlx::query_as::<_, Course>(&sql)
            .bind(req.title)
            .bind(req.code)
            .bind(req.description)
            .bind(req.credits)
            .fetch_one(&self.pool)
            .await
        {
            Ok(course) => Some(course),
            Err(e) => {
                tracing::error!("create_course error: {:?}", e);
                None
            }
        }
    }

    /// update_course
    ///
    /// Uses COALESCE so only the fields present in the request overwrite the row.
    async fn update_course(&self, id: i32, req: UpdateCourseRequest) -> Option<Course> {
        let sql = format!(
            "UPDATE courses \
             SET title = COALESCE($2, title), \
                 code = COALESCE($3, code), \
                 description = COALESCE($4, description), \
                 credits = COALESCE($5, credits) \
             WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(req.title)
            .bind(req.code)
            .bind(req.description)
            .bind(req.credits)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("update_course error: {:?}", e);
                None
            })
    }

    /// delete_course
    ///
    /// The RESTRICT foreign key on enrollments.course_id rejects the delete while
    /// any enrollment references the course; that rejection surfaces as Blocked.
    async fn delete_course(&self, id: i32) -> DeleteOutcome {
        match sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) if res.rows_affected() > 0 => DeleteOutcome::Deleted,
            Ok(_) => DeleteOutcome::NotFound,
            Err(e) if fk_violation(&e) => DeleteOutcome::Blocked,
            Err(e) => {
                tracing::error!("delete_course error: {:?}", e);
                DeleteOutcome::NotFound
            }
        }
    }

    /// create_user
    ///
    /// `ON CONFLICT (email) DO NOTHING` makes the uniqueness check atomic with
    /// the insert; no returned row means the address is already registered.
    async fn create_user(&self, user: NewUser) -> Option<User> {
        let sql = format!(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (email) DO NOTHING RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.is_admin)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("create_user error: {:?}", e);
                None
            })
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }

    async fn find_credentials(&self, email: &str) -> Option<UserCredentials> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("find_credentials error: {:?}", e);
            None
        })
    }

    async fn list_users(&self) -> Vec<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, email");
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_users error: {:?}", e);
                vec![]
            })
    }

    async fn update_user(&self, id: Uuid, req: UpdateUserRequest) -> Option<User> {
        let sql = format!(
            "UPDATE users \
             SET email = COALESCE($2, email), \
                 first_name = COALESCE($3, first_name), \
                 last_name = COALESCE($4, last_name), \
                 is_admin = COALESCE($5, is_admin) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        match sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(req.email)
            .bind(req.first_name)
            .bind(req.last_name)
            .bind(req.is_admin)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(user) => user,
            Err(e) if unique_violation(&e) => {
                // New email collides with another account; treated like any other
                // failed update.
                None
            }
            Err(e) => {
                tracing::error!("update_user error: {:?}", e);
                None
            }
        }
    }

    async fn delete_user(&self, id: Uuid) -> DeleteOutcome {
        match sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) if res.rows_affected() > 0 => DeleteOutcome::Deleted,
            Ok(_) => DeleteOutcome::NotFound,
            Err(e) if fk_violation(&e) => DeleteOutcome::Blocked,
            Err(e) => {
                tracing::error!("delete_user error: {:?}", e);
                DeleteOutcome::NotFound
            }
        }
    }

    /// course_summary
    ///
    /// Course identity fields plus the roster, joined from users with the
    /// enrollment timestamp.
    async fn course_summary(&self, course_id: i32) -> Option<CourseSummary> {
        let course = self.get_course(course_id).await?;

        let enrolled_users = sqlx::query_as::<_, EnrolledUser>(
            "SELECT e.user_id, u.email, u.first_name, u.last_name, u.is_admin, e.enrolled_at \
             FROM enrollments e JOIN users u ON e.user_id = u.id \
             WHERE e.course_id = $1 ORDER BY e.enrolled_at",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("course_summary error: {:?}", e);
            vec![]
        });

        Some(CourseSummary {
            course_id: course.id,
            title: course.title,
            code: course.code,
            total_enrollments: enrolled_users.len() as i64,
            enrolled_users,
        })
    }

    async fn list_enrollments(&self) -> Vec<EnrollmentRecord> {
        sqlx::query_as::<_, EnrollmentRecord>(
            "SELECT e.user_id, e.course_id, u.email AS user_email, \
                    u.first_name || ' ' || u.last_name AS user_name, \
                    c.title AS course_title, e.enrolled_at \
             FROM enrollments e \
             JOIN users u ON e.user_id = u.id \
             JOIN courses c ON e.course_id = c.id \
             ORDER BY e.enrolled_at",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_enrollments error: {:?}", e);
            vec![]
        })
    }
}

// --- The In-Memory Implementation (For Tests and Local Experiments) ---

/// Backing state for `MemoryRepository`. One mutex guards the whole store, so
/// each operation observes and mutates a consistent snapshot.
#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    // user id -> Argon2 PHC string
    credentials: std::collections::HashMap<Uuid, String>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    next_course_id: i32,
    next_enrollment_id: i64,
}

/// MemoryRepository
///
/// An in-memory implementation of `Repository` with the same observable
/// semantics as the Postgres one. It backs the handler and repository test
/// suites, where exercising the enrollment rules must not require a database.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_courses(&self) -> Vec<Course> {
        let state = self.state.lock().expect("repository state poisoned");
        let mut courses = state.courses.clone();
        courses.sort_by_key(|c| c.id);
        courses
    }

    async fn get_course(&self, id: i32) -> Option<Course> {
        let state = self.state.lock().expect("repository state poisoned");
        state.courses.iter().find(|c| c.id == id).cloned()
    }

    /// The existence check and insert happen under one lock, matching the
    /// atomicity the unique constraint provides in Postgres.
    async fn enroll(&self, user_id: Uuid, course_id: i32) -> EnrollOutcome {
        let mut state = self.state.lock().expect("repository state poisoned");
        if !state.users.iter().any(|u| u.id == user_id)
            || !state.courses.iter().any(|c| c.id == course_id)
        {
            return EnrollOutcome::NotFound;
        }
        if state
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id)
        {
            return EnrollOutcome::AlreadyEnrolled;
        }
        state.next_enrollment_id += 1;
        let id = state.next_enrollment_id;
        state.enrollments.push(Enrollment {
            id,
            user_id,
            course_id,
            enrolled_at: Utc::now(),
        });
        EnrollOutcome::Enrolled
    }

    async fn deregister(&self, user_id: Uuid, course_id: i32) -> bool {
        let mut state = self.state.lock().expect("repository state poisoned");
        let before = state.enrollments.len();
        state
            .enrollments
            .retain(|e| !(e.user_id == user_id && e.course_id == course_id));
        state.enrollments.len() < before
    }

    async fn enrolled_courses(&self, user_id: Uuid) -> Vec<Course> {
        let state = self.state.lock().expect("repository state poisoned");
        let mut courses: Vec<Course> = state
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter_map(|e| state.courses.iter().find(|c| c.id == e.course_id).cloned())
            .collect();
        courses.sort_by_key(|c| c.id);
        courses
    }

    async fn available_courses(&self, user_id: Uuid) -> Vec<Course> {
        let state = self.state.lock().expect("repository state poisoned");
        let enrolled: Vec<i32> = state
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.course_id)
            .collect();
        let mut courses: Vec<Course> = state
            .courses
            .iter()
            .filter(|c| !enrolled.contains(&c.id))
            .cloned()
            .collect();
        courses.sort_by_key(|c| c.id);
        courses
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Option<Course> {
        let mut state = self.state.lock().expect("repository state poisoned");
        state.next_course_id += 1;
        let course = Course {
            id: state.next_course_id,
            title: req.title,
            code: req.code,
            description: req.description,
            credits: req.credits,
        };
        state.courses.push(course.clone());
        Some(course)
    }

    async fn update_course(&self, id: i32, req: UpdateCourseRequest) -> Option<Course> {
        let mut state = self.state.lock().expect("repository state poisoned");
        let course = state.courses.iter_mut().find(|c| c.id == id)?;
        if let Some(title) = req.title {
            course.title = title;
        }
        if let Some(code) = req.code {
            course.code = code;
        }
        if let Some(description) = req.description {
            course.description = description;
        }
        if let Some(credits) = req.credits {
            course.credits = credits;
        }
        Some(course.clone())
    }

    async fn delete_course(&self, id: i32) -> DeleteOutcome {
        let mut state = self.state.lock().expect("repository state poisoned");
        if !state.courses.iter().any(|c| c.id == id) {
            return DeleteOutcome::NotFound;
        }
        // No constraint engine here, so the referential guard stays an explicit check.
        if state.enrollments.iter().any(|e| e.course_id == id) {
            return DeleteOutcome::Blocked;
        }
        state.courses.retain(|c| c.id != id);
        DeleteOutcome::Deleted
    }

    async fn create_user(&self, user: NewUser) -> Option<User> {
        let mut state = self.state.lock().expect("repository state poisoned");
        if state.users.iter().any(|u| u.email == user.email) {
            return None;
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        state.credentials.insert(created.id, user.password_hash);
        state.users.push(created.clone());
        Some(created)
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        let state = self.state.lock().expect("repository state poisoned");
        state.users.iter().find(|u| u.id == id).cloned()
    }

    async fn find_credentials(&self, email: &str) -> Option<UserCredentials> {
        let state = self.state.lock().expect("repository state poisoned");
        let user = state.users.iter().find(|u| u.email == email)?;
        let password_hash = state.credentials.get(&user.id)?.clone();
        Some(UserCredentials {
            id: user.id,
            email: user.email.clone(),
            password_hash,
        })
    }

    async fn list_users(&self) -> Vec<User> {
        let state = self.state.lock().expect("repository state poisoned");
        state.users.clone()
    }

    async fn update_user(&self, id: Uuid, req: UpdateUserRequest) -> Option<User> {
        let mut state = self.state.lock().expect("repository state poisoned");
        if let Some(email) = &req.email {
            // Same uniqueness rule the database enforces.
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return None;
            }
        }
        let user = state.users.iter_mut().find(|u| u.id == id)?;
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(first_name) = req.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            user.last_name = last_name;
        }
        if let Some(is_admin) = req.is_admin {
            user.is_admin = is_admin;
        }
        Some(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> DeleteOutcome {
        let mut state = self.state.lock().expect("repository state poisoned");
        if !state.users.iter().any(|u| u.id == id) {
            return DeleteOutcome::NotFound;
        }
        if state.enrollments.iter().any(|e| e.user_id == id) {
            return DeleteOutcome::Blocked;
        }
        state.users.retain(|u| u.id != id);
        state.credentials.remove(&id);
        DeleteOutcome::Deleted
    }

    async fn course_summary(&self, course_id: i32) -> Option<CourseSummary> {
        let state = self.state.lock().expect("repository state poisoned");
        let course = state.courses.iter().find(|c| c.id == course_id)?;

        let mut enrolled_users: Vec<EnrolledUser> = state
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| {
                let user = state.users.iter().find(|u| u.id == e.user_id)?;
                Some(EnrolledUser {
                    user_id: user.id,
                    email: user.email.clone(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    is_admin: user.is_admin,
                    enrolled_at: e.enrolled_at,
                })
            })
            .collect();
        enrolled_users.sort_by_key(|u| u.enrolled_at);

        Some(CourseSummary {
            course_id: course.id,
            title: course.title.clone(),
            code: course.code.clone(),
            total_enrollments: enrolled_users.len() as i64,
            enrolled_users,
        })
    }

    async fn list_enrollments(&self) -> Vec<EnrollmentRecord> {
        let state = self.state.lock().expect("repository state poisoned");
        let mut records: Vec<EnrollmentRecord> = state
            .enrollments
            .iter()
            .filter_map(|e| {
                let user = state.users.iter().find(|u| u.id == e.user_id)?;
                let course = state.courses.iter().find(|c| c.id == e.course_id)?;
                Some(EnrollmentRecord {
                    user_id: user.id,
                    course_id: course.id,
                    user_email: user.email.clone(),
                    user_name: format!("{} {}", user.first_name, user.last_name),
                    course_title: course.title.clone(),
                    enrolled_at: e.enrolled_at,
                })
            })
            .collect();
        records.sort_by_key(|r| r.enrolled_at);
        records
    }
}
