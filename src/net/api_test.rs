use super::*;

// =============================================================================
// classify_auth
// =============================================================================

#[test]
fn auth_401_is_invalid_credentials() {
    assert!(matches!(classify_auth(401, String::new()), ApiError::InvalidCredentials));
}

#[test]
fn auth_409_is_email_taken() {
    assert!(matches!(classify_auth(409, String::new()), ApiError::EmailTaken));
}

#[test]
fn auth_500_keeps_status_and_body() {
    match classify_auth(500, "boom".to_owned()) {
        ApiError::Response { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Response, got {other:?}"),
    }
}

// =============================================================================
// classify_bearer
// =============================================================================

#[test]
fn bearer_401_is_unauthorized() {
    assert!(matches!(classify_bearer(401, String::new()), ApiError::Unauthorized));
}

#[test]
fn bearer_403_is_forbidden_not_unauthorized() {
    assert!(matches!(classify_bearer(403, String::new()), ApiError::Forbidden));
}

#[test]
fn bearer_404_keeps_status() {
    assert!(matches!(classify_bearer(404, String::new()), ApiError::Response { status: 404, .. }));
}

// =============================================================================
// is_success
// =============================================================================

#[test]
fn success_covers_2xx_only() {
    assert!(is_success(200));
    assert!(is_success(201));
    assert!(is_success(299));
    assert!(!is_success(199));
    assert!(!is_success(301));
    assert!(!is_success(401));
}

// =============================================================================
// parse_json
// =============================================================================

#[test]
fn parse_auth_success_body() {
    let json = r#"{"user":{"id":"1","email":"a@b.com","role":"user"},"token":"T1"}"#;
    let success: AuthSuccess = parse_json(json).unwrap();
    assert_eq!(success.token, "T1");
    assert_eq!(success.user.id, "1");
}

#[test]
fn parse_profile_body_unwraps_user() {
    let json = r#"{"user":{"id":"9","email":"x@y.z","role":"admin"}}"#;
    let profile: ProfileBody = parse_json(json).unwrap();
    assert!(profile.user.is_admin());
}

#[test]
fn parse_garbage_is_parse_error() {
    let result: Result<AuthSuccess, ApiError> = parse_json("not json");
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

// =============================================================================
// wire bodies
// =============================================================================

#[test]
fn credentials_body_shape() {
    let body = CredentialsBody { email: "a@b.com", password: "secret" };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({"email": "a@b.com", "password": "secret"}));
}

#[test]
fn role_body_serializes_value() {
    let json = serde_json::to_value(&RoleBody { role: Role::Admin }).unwrap();
    assert_eq!(json, serde_json::json!({"role": "admin"}));
}

#[test]
fn status_body_serializes_value() {
    let json = serde_json::to_value(&StatusBody { status: UserStatus::Locked }).unwrap();
    assert_eq!(json, serde_json::json!({"status": "locked"}));
}

// =============================================================================
// HttpApi url handling
// =============================================================================

#[test]
fn new_trims_trailing_slash() {
    let api = HttpApi::new("http://localhost:9090/api/v1/").unwrap();
    assert_eq!(api.url("/login"), "http://localhost:9090/api/v1/login");
}

#[test]
fn url_joins_nested_paths() {
    let api = HttpApi::new("http://localhost:9090/api/v1").unwrap();
    assert_eq!(api.url("/users/u-1/role"), "http://localhost:9090/api/v1/users/u-1/role");
}
