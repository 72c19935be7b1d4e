use axum::response::IntoResponse;
use jsonwebtoken::{encode, EncodingKey, Header};
use learntrack_backend::{
    error::AppError,
    middleware::auth::{classify_jwt_error, parse_bearer_token, AuthFailure},
    utils::jwt::{create_access_token, verify_access_token, Claims},
};
use uuid::Uuid;

#[test]
fn issued_token_verifies_and_carries_subject() {
    let user_id = Uuid::new_v4();
    let token = create_access_token(
        user_id,
        "learner@example.com".into(),
        "student".into(),
        "test-secret",
        7,
    )
    .expect("issue token");

    let claims = verify_access_token(&token, "test-secret").expect("verify");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.expires_at().timestamp(), claims.exp);
    // 7-day expiry window
    let lifetime = claims.exp - claims.iat;
    assert_eq!(lifetime, 7 * 24 * 60 * 60);
}

#[test]
fn each_issued_token_gets_a_unique_jti() {
    let user_id = Uuid::new_v4();
    let issue = || {
        let token = create_access_token(
            user_id,
            "learner@example.com".into(),
            "student".into(),
            "test-secret",
            7,
        )
        .unwrap();
        verify_access_token(&token, "test-secret").unwrap().jti
    };
    assert_ne!(issue(), issue());
}

#[test]
fn expired_token_is_classified_as_expired() {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "learner@example.com".into(),
        role: "student".into(),
        exp: chrono::Utc::now().timestamp() - 60,
        iat: chrono::Utc::now().timestamp() - 3600,
        jti: Uuid::new_v4().to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    let err = verify_access_token(&token, "test-secret").unwrap_err();
    assert_eq!(classify_jwt_error(&err), AuthFailure::Expired);
}

#[test]
fn tampered_signature_and_garbage_are_distinct_failures() {
    let token = create_access_token(
        Uuid::new_v4(),
        "learner@example.com".into(),
        "student".into(),
        "test-secret",
        7,
    )
    .unwrap();

    let err = verify_access_token(&token, "other-secret").unwrap_err();
    assert_eq!(classify_jwt_error(&err), AuthFailure::BadSignature);

    let err = verify_access_token("definitely.not.a.jwt", "test-secret").unwrap_err();
    assert_eq!(classify_jwt_error(&err), AuthFailure::Malformed);
}

#[tokio::test]
async fn every_auth_failure_maps_to_401() {
    for failure in [
        AuthFailure::NoToken,
        AuthFailure::Malformed,
        AuthFailure::Expired,
        AuthFailure::BadSignature,
        AuthFailure::Revoked,
        AuthFailure::NoActiveSession,
        AuthFailure::UnknownUser,
    ] {
        let err: AppError = failure.into();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}

#[test]
fn bearer_parsing_tolerates_scheme_casing_only() {
    assert_eq!(parse_bearer_token("Bearer tok"), Some("tok"));
    assert_eq!(parse_bearer_token("bearer tok"), Some("tok"));
    assert_eq!(parse_bearer_token("BeArEr tok"), Some("tok"));
    assert_eq!(parse_bearer_token("Token tok"), None);
}
