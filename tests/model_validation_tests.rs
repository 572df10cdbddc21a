use chrono::Utc;
use course_portal::models::{
    CreateCourseRequest, CreateUserRequest, EnrollmentRecord, RegisterRequest,
    UpdateCourseRequest, UpdateUserRequest, User,
};
use uuid::Uuid;

// --- Boundary Validation ---

#[test]
fn test_course_credits_bounds() {
    let mut req = CreateCourseRequest {
        title: "Valid Title".to_string(),
        code: "VT101".to_string(),
        description: "A valid description".to_string(),
        credits: 1,
    };
    assert!(req.validate().is_ok());

    req.credits = 10;
    assert!(req.validate().is_ok());

    req.credits = 0;
    assert!(req.validate().is_err(), "Zero credits must be rejected");

    req.credits = 11;
    assert!(req.validate().is_err(), "Credits above 10 must be rejected");
}

#[test]
fn test_course_text_field_limits() {
    let base = CreateCourseRequest {
        title: "Title".to_string(),
        code: "C1".to_string(),
        description: "Desc".to_string(),
        credits: 3,
    };

    let mut too_long_title = base.clone();
    too_long_title.title = "t".repeat(101);
    assert!(too_long_title.validate().is_err());

    let mut empty_code = base.clone();
    empty_code.code = String::new();
    assert!(empty_code.validate().is_err());

    let mut too_long_description = base.clone();
    too_long_description.description = "d".repeat(501);
    assert!(too_long_description.validate().is_err());

    assert!(base.validate().is_ok());
}

#[test]
fn test_register_request_validation() {
    let valid = RegisterRequest {
        email: "student@example.com".to_string(),
        password: "hunter2x".to_string(),
    };
    assert!(valid.validate().is_ok());

    let bad_email = RegisterRequest {
        email: "not-an-email".to_string(),
        password: "hunter2x".to_string(),
    };
    assert!(bad_email.validate().is_err());

    let short_password = RegisterRequest {
        email: "student@example.com".to_string(),
        password: "abc".to_string(),
    };
    assert!(short_password.validate().is_err());
}

#[test]
fn test_create_user_request_requires_names() {
    let mut req = CreateUserRequest {
        email: "admin@example.com".to_string(),
        password: "secret-enough".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        is_admin: true,
    };
    assert!(req.validate().is_ok());

    req.first_name = String::new();
    assert!(req.validate().is_err());
}

#[test]
fn test_update_requests_accept_empty_payloads() {
    // Partial updates: an all-None payload is valid and applies nothing.
    assert!(UpdateCourseRequest::default().validate().is_ok());
    assert!(UpdateUserRequest::default().validate().is_ok());

    // But a provided field is still bounds-checked.
    let bad = UpdateCourseRequest {
        credits: Some(42),
        ..Default::default()
    };
    assert!(bad.validate().is_err());
}

// --- Serialization Shapes ---

#[test]
fn test_update_course_request_optionality() {
    // Confirms the structure supports partial updates (all fields are Option<T>).
    let partial_update = UpdateCourseRequest {
        title: Some("New Title Only".to_string()),
        code: None,
        description: None,
        credits: None,
    };

    let json_output = serde_json::to_string(&partial_update).unwrap();
    assert!(json_output.contains(r#""title":"New Title Only""#));
    assert!(!json_output.contains("description")); // None fields are omitted
}

#[test]
fn test_user_serialization_has_no_secret_material() {
    let user = User {
        id: Uuid::new_v4(),
        email: "safe@example.com".to_string(),
        first_name: "Safe".to_string(),
        last_name: "User".to_string(),
        is_admin: false,
        created_at: Utc::now(),
    };

    let json_output = serde_json::to_string(&user).unwrap();
    assert!(json_output.contains(r#""email":"safe@example.com""#));
    // The API user model carries no password material at all.
    assert!(!json_output.contains("password"));
    assert!(!json_output.contains("hash"));
}

#[test]
fn test_enrollment_record_json_shape() {
    let record = EnrollmentRecord {
        user_id: Uuid::new_v4(),
        course_id: 7,
        user_email: "ada@example.com".to_string(),
        user_name: "Ada Lovelace".to_string(),
        course_title: "Analytical Engines".to_string(),
        enrolled_at: Utc::now(),
    };

    let json_output = serde_json::to_string(&record).unwrap();
    assert!(json_output.contains(r#""user_name":"Ada Lovelace""#));
    assert!(json_output.contains(r#""course_title":"Analytical Engines""#));
    assert!(json_output.contains(r#""course_id":7"#));
}
