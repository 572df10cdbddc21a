use crate::{
    AppState,
    auth::{self, AuthUser},
    models::{
        AdminEnrollmentRequest, AuthResponse, Course, CourseSummary, CreateCourseRequest,
        CreateUserRequest, EnrollmentRecord, LoginRequest, NewUser, RegisterRequest,
        UpdateCourseRequest, UpdateUserRequest, User,
    },
    repository::{DeleteOutcome, EnrollOutcome},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// --- Identity Handlers ---

/// register_user
///
/// [Public Route] Creates a non-admin account and returns a signed bearer token,
/// so registration doubles as the first login.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, &'static str)> {
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    // The raw password never goes past this point; only the hash is stored.
    let password_hash = auth::hash_password(&payload.password).map_err(|e| {
        tracing::error!("password hashing failed: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "registration failed")
    })?;

    let user = state
        .repo
        .create_user(NewUser {
            email: payload.email,
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            is_admin: false,
        })
        .await
        .ok_or((StatusCode::BAD_REQUEST, "email is already registered"))?;

    let token = auth::issue_token(user.id, &state.config.jwt_secret, state.config.token_ttl_minutes)
        .map_err(|e| {
            tracing::error!("token issuance failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "registration failed")
        })?;

    Ok(Json(AuthResponse { token }))
}

/// login_user
///
/// [Public Route] Verifies the password against the stored Argon2 hash and
/// returns a fresh token. Unknown email and wrong password are indistinguishable
/// to the caller.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, &'static str)> {
    let invalid = (StatusCode::UNAUTHORIZED, "invalid credentials");

    let credentials = state
        .repo
        .find_credentials(&payload.email)
        .await
        .ok_or(invalid)?;

    if !auth::verify_password(&payload.password, &credentials.password_hash) {
        return Err(invalid);
    }

    let token = auth::issue_token(
        credentials.id,
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )
    .map_err(|e| {
        tracing::error!("token issuance failed: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "login failed")
    })?;

    Ok(Json(AuthResponse { token }))
}

/// get_me
///
/// [Authenticated Route] Provides the authenticated user's profile record.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile", body = User))
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<User>, StatusCode> {
    match state.repo.get_user(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Catalog Handlers ---

/// get_courses
///
/// [Public Route] Lists the full course catalog, independent of any user's
/// enrollment state.
#[utoipa::path(
    get,
    path = "/courses",
    responses((status = 200, description = "Course catalog", body = [Course]))
)]
pub async fn get_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.repo.list_courses().await)
}

/// get_course_details
///
/// [Public Route] Retrieves a single course by id. Absence is a plain 404, not
/// an error payload.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Found", body = Course),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_course_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Course>, StatusCode> {
    match state.repo.get_course(id).await {
        Some(course) => Ok(Json(course)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Student Enrollment Handlers ---
// The student facade is constrained to the caller's own id: every operation
// below passes the token-resolved `AuthUser.id` into the shared repository.

/// enroll
///
/// [Authenticated Route] Enrolls the caller into a course.
///
/// *Idempotency*: The unique constraint on (user_id, course_id) makes this an
/// atomic insert-if-absent; a second attempt surfaces as 409, not a duplicate row.
#[utoipa::path(
    post,
    path = "/enrollments/enroll/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrolled"),
        (status = 409, description = "Already enrolled"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn enroll(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> (StatusCode, &'static str) {
    match state.repo.enroll(id, course_id).await {
        EnrollOutcome::Enrolled => (StatusCode::OK, "enrollment successful"),
        EnrollOutcome::AlreadyEnrolled => {
            (StatusCode::CONFLICT, "already enrolled in this course")
        }
        EnrollOutcome::NotFound => (StatusCode::NOT_FOUND, "course not found"),
    }
}

/// deregister
///
/// [Authenticated Route] Removes the caller's enrollment in a course. The row is
/// physically deleted; there is no enrollment history to reconstruct afterwards.
#[utoipa::path(
    delete,
    path = "/enrollments/deregister/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Deregistered"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn deregister(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> StatusCode {
    if state.repo.deregister(id, course_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// get_my_courses
///
/// [Authenticated Route] Lists the courses the caller is currently enrolled in.
#[utoipa::path(
    get,
    path = "/enrollments/my-courses",
    responses((status = 200, description = "Enrolled courses", body = [Course]))
)]
pub async fn get_my_courses(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<Course>> {
    Json(state.repo.enrolled_courses(id).await)
}

/// get_available_courses
///
/// [Authenticated Route] Lists the catalog minus the caller's enrolled courses.
/// Together with /my-courses this partitions the catalog: the two sets are
/// disjoint and their union is the full course list.
#[utoipa::path(
    get,
    path = "/enrollments/available-courses",
    responses((status = 200, description = "Available courses", body = [Course]))
)]
pub async fn get_available_courses(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<Course>> {
    Json(state.repo.available_courses(id).await)
}

// --- Admin: Course Management ---

/// create_course
///
/// [Admin Route] Adds a new catalog entry after boundary validation.
#[utoipa::path(
    post,
    path = "/admin/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Created", body = Course),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn create_course(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), (StatusCode, &'static str)> {
    if !is_admin {
        return Err((StatusCode::FORBIDDEN, "admin privileges required"));
    }
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match state.repo.create_course(payload).await {
        Some(course) => Ok((StatusCode::CREATED, Json(course))),
        None => Err((StatusCode::INTERNAL_SERVER_ERROR, "failed to create course")),
    }
}

/// update_course
///
/// [Admin Route] Applies a partial update to an existing course.
#[utoipa::path(
    put,
    path = "/admin/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated", body = Course),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_course(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, (StatusCode, &'static str)> {
    if !is_admin {
        return Err((StatusCode::FORBIDDEN, "admin privileges required"));
    }
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match state.repo.update_course(id, payload).await {
        Some(course) => Ok(Json(course)),
        None => Err((StatusCode::NOT_FOUND, "course not found")),
    }
}

/// delete_course
///
/// [Admin Route] Removes a course. Refused with 409 while any enrollment still
/// references it; deregister those first.
#[utoipa::path(
    delete,
    path = "/admin/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 409, description = "Course still has enrollments"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_course(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> (StatusCode, &'static str) {
    if !is_admin {
        return (StatusCode::FORBIDDEN, "admin privileges required");
    }
    match state.repo.delete_course(id).await {
        DeleteOutcome::Deleted => (StatusCode::NO_CONTENT, ""),
        DeleteOutcome::Blocked => (
            StatusCode::CONFLICT,
            "cannot delete a course with enrollments",
        ),
        DeleteOutcome::NotFound => (StatusCode::NOT_FOUND, "course not found"),
    }
}

// --- Admin: User Management ---

/// create_user
///
/// [Admin Route] Provisions an account, optionally with the admin flag set.
#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Validation failed or email taken"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn create_user(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), (StatusCode, &'static str)> {
    if !is_admin {
        return Err((StatusCode::FORBIDDEN, "admin privileges required"));
    }
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let password_hash = auth::hash_password(&payload.password).map_err(|e| {
        tracing::error!("password hashing failed: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to create user")
    })?;

    let user = state
        .repo
        .create_user(NewUser {
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            is_admin: payload.is_admin,
        })
        .await
        .ok_or((StatusCode::BAD_REQUEST, "email is already registered"))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// update_user
///
/// [Admin Route] Applies a partial profile update, including toggling the admin flag.
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_user(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, (StatusCode, &'static str)> {
    if !is_admin {
        return Err((StatusCode::FORBIDDEN, "admin privileges required"));
    }
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match state.repo.update_user(id, payload).await {
        Some(user) => Ok(Json(user)),
        None => Err((StatusCode::NOT_FOUND, "user not found")),
    }
}

/// delete_user
///
/// [Admin Route] Removes an account. The referential guard is symmetric with
/// course deletion: refused with 409 while the user holds any enrollment.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 409, description = "User still has enrollments"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> (StatusCode, &'static str) {
    if !is_admin {
        return (StatusCode::FORBIDDEN, "admin privileges required");
    }
    match state.repo.delete_user(id).await {
        DeleteOutcome::Deleted => (StatusCode::NO_CONTENT, ""),
        DeleteOutcome::Blocked => (
            StatusCode::CONFLICT,
            "cannot delete a user with enrollments",
        ),
        DeleteOutcome::NotFound => (StatusCode::NOT_FOUND, "user not found"),
    }
}

/// get_all_users
///
/// [Admin Route] Lists every account for operator review.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn get_all_users(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, StatusCode> {
    if !is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(state.repo.list_users().await))
}

/// get_user_details
///
/// [Admin Route] Retrieves a single account by id.
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Found", body = User),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user_details(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    if !is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    match state.repo.get_user(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Admin: Enrollment Management ---
// The admin facade runs the same repository operations as the student one, with
// the target user named explicitly, so both surfaces stay mutually consistent.

/// admin_enroll
///
/// [Admin Route] Enrolls any user into any course on their behalf.
#[utoipa::path(
    post,
    path = "/admin/enrollments",
    request_body = AdminEnrollmentRequest,
    responses(
        (status = 200, description = "Enrolled"),
        (status = 409, description = "Already enrolled"),
        (status = 404, description = "User or course not found")
    )
)]
pub async fn admin_enroll(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AdminEnrollmentRequest>,
) -> (StatusCode, &'static str) {
    if !is_admin {
        return (StatusCode::FORBIDDEN, "admin privileges required");
    }
    match state.repo.enroll(payload.user_id, payload.course_id).await {
        EnrollOutcome::Enrolled => (StatusCode::OK, "user enrolled successfully"),
        EnrollOutcome::AlreadyEnrolled => (
            StatusCode::CONFLICT,
            "user is already enrolled in this course",
        ),
        EnrollOutcome::NotFound => (StatusCode::NOT_FOUND, "user or course not found"),
    }
}

/// admin_deregister
///
/// [Admin Route] Removes any user's enrollment on their behalf.
#[utoipa::path(
    delete,
    path = "/admin/enrollments",
    request_body = AdminEnrollmentRequest,
    responses(
        (status = 204, description = "Deregistered"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn admin_deregister(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AdminEnrollmentRequest>,
) -> (StatusCode, &'static str) {
    if !is_admin {
        return (StatusCode::FORBIDDEN, "admin privileges required");
    }
    if state
        .repo
        .deregister(payload.user_id, payload.course_id)
        .await
    {
        (StatusCode::NO_CONTENT, "")
    } else {
        (StatusCode::NOT_FOUND, "enrollment not found")
    }
}

/// get_course_summary
///
/// [Admin Route] Per-course report: identity fields, headcount, and the roster
/// with contact fields and enrollment timestamps.
#[utoipa::path(
    get,
    path = "/admin/enrollments/course/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Summary", body = CourseSummary),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course_summary(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<CourseSummary>, StatusCode> {
    if !is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    match state.repo.course_summary(course_id).await {
        Some(summary) => Ok(Json(summary)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_all_enrollments
///
/// [Admin Route] The global enrollment listing, joined with user and course
/// display fields, as a flat list for operator review.
#[utoipa::path(
    get,
    path = "/admin/enrollments",
    responses((status = 200, description = "All enrollments", body = [EnrollmentRecord]))
)]
pub async fn get_all_enrollments(
    AuthUser { is_admin, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentRecord>>, StatusCode> {
    if !is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(state.repo.list_enrollments().await))
}
