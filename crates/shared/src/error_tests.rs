use rstest::rstest;

use crate::error::AppError;

#[rstest]
#[case(AppError::Unauthorized("x".into()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden("x".into()), 403, "FORBIDDEN")]
#[case(AppError::NotFound("x".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("x".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::Database("x".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("x".into()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Validation("Entreprise invalide".into()).to_string(),
        "Validation error: Entreprise invalide"
    );
    assert_eq!(
        AppError::Database("connection reset".into()).to_string(),
        "Database error: connection reset"
    );
}

#[test]
fn test_public_message_hides_server_details() {
    let err = AppError::Database("password authentication failed for user".into());
    assert!(err.is_server_error());
    assert_eq!(err.public_message(), "An error occurred");

    let err = AppError::NotFound("Accounting entry not found".into());
    assert!(!err.is_server_error());
    assert_eq!(err.public_message(), "Accounting entry not found");
}
