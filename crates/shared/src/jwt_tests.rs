//! Unit tests for claims and token handling.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::Claims;
use crate::jwt::{JwtConfig, JwtError, JwtService};

fn service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
    })
}

#[test]
fn test_claims_new_sets_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "accountant", expires_at);

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.role(), "accountant");
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_token_roundtrip_keeps_subject_and_role() {
    let service = service();
    let user_id = Uuid::new_v4();

    let token = service.generate_access_token(user_id, "admin").unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.role(), "admin");
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_minutes: 15,
    });
    let token = other.generate_access_token(Uuid::new_v4(), "admin").unwrap();

    assert!(matches!(
        service().validate_token(&token),
        Err(JwtError::DecodingError(_))
    ));
}

#[test]
fn test_expired_token_is_rejected() {
    let expired = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: -10,
    });
    let token = expired.generate_access_token(Uuid::new_v4(), "admin").unwrap();

    assert!(matches!(service().validate_token(&token), Err(JwtError::Expired)));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(service().validate_token("invalid.token.here").is_err());
}

#[test]
fn test_access_token_expires_in_seconds() {
    assert_eq!(service().access_token_expires_in(), 900);
}
