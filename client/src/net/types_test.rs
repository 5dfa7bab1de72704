use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_uses_backend_spelling() {
    assert_eq!(serde_json::to_value(Role::SuperUser).unwrap(), "super_user");
    assert_eq!(serde_json::to_value(Role::Client).unwrap(), "client");
}

#[test]
fn role_rejects_unknown_value() {
    assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
}

// =============================================================
// User
// =============================================================

#[test]
fn user_ignores_extra_backend_fields() {
    let json = serde_json::json!({
        "id": 7,
        "email": "admin@dracarys.com",
        "name": "Admin User",
        "role": "super_user",
        "is_active": true,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": null
    });
    let user: User = serde_json::from_value(json).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "admin@dracarys.com");
    assert!(user.is_super_user());
    assert!(user.is_active);
}

#[test]
fn client_role_is_not_super_user() {
    let user = User {
        id: 1,
        email: "a@x.com".into(),
        name: "A".into(),
        role: Role::Client,
        is_active: true,
    };
    assert!(!user.is_super_user());
}

// =============================================================
// TokenResponse
// =============================================================

#[test]
fn token_response_defaults_token_type() {
    let json = serde_json::json!({
        "access_token": "tok1",
        "user": { "id": 1, "email": "a@x.com", "name": "A", "role": "client", "is_active": true }
    });
    let resp: TokenResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.access_token, "tok1");
    assert_eq!(resp.token_type, "bearer");
    assert_eq!(resp.user.name, "A");
}

#[test]
fn token_response_requires_user() {
    let json = serde_json::json!({ "access_token": "tok1", "token_type": "bearer" });
    assert!(serde_json::from_value::<TokenResponse>(json).is_err());
}

// =============================================================
// ForgotPasswordRequest
// =============================================================

#[test]
fn forgot_password_request_without_email_serializes_empty() {
    let req: ForgotPasswordRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.email, None);
    assert_eq!(serde_json::to_string(&req).unwrap(), "{}");
}

#[test]
fn forgot_password_request_drops_unknown_fields() {
    let req: ForgotPasswordRequest =
        serde_json::from_str(r#"{"email":"a@x.com","extra":1}"#).unwrap();
    assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({ "email": "a@x.com" }));
}

#[test]
fn forgot_password_request_keeps_non_string_email() {
    let req: ForgotPasswordRequest = serde_json::from_str(r#"{"email":42}"#).unwrap();
    assert_eq!(req.email, Some(serde_json::json!(42)));
    assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"email":42}"#);
}
