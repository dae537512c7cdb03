use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound(String::new()), 404)]
#[case(AppError::Conflict(String::new()), 409)]
#[case(AppError::InvalidInput(String::new()), 400)]
#[case(AppError::InvalidState(String::new()), 422)]
#[case(AppError::SequenceViolation(String::new()), 422)]
#[case(AppError::Database(String::new()), 500)]
#[case(AppError::Internal(String::new()), 500)]
fn test_error_status_codes(#[case] err: AppError, #[case] expected: u16) {
    assert_eq!(err.status_code(), expected);
}

#[rstest]
#[case(AppError::NotFound(String::new()), "NOT_FOUND")]
#[case(AppError::Conflict(String::new()), "CONFLICT")]
#[case(AppError::InvalidInput(String::new()), "INVALID_INPUT")]
#[case(AppError::InvalidState(String::new()), "INVALID_STATE")]
#[case(AppError::SequenceViolation(String::new()), "SEQUENCE_VIOLATION")]
#[case(AppError::Database(String::new()), "DATABASE_ERROR")]
#[case(AppError::Internal(String::new()), "INTERNAL_ERROR")]
fn test_error_codes(#[case] err: AppError, #[case] expected: &str) {
    assert_eq!(err.error_code(), expected);
}

#[test]
fn test_recoverable() {
    assert!(AppError::SequenceViolation("period 3 before 2".into()).is_recoverable());
    assert!(AppError::Conflict("year 2025 exists".into()).is_recoverable());
    assert!(!AppError::Database("connection reset".into()).is_recoverable());
    assert!(!AppError::Internal("oops".into()).is_recoverable());
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::SequenceViolation("earlier periods open".into()).to_string(),
        "Sequence violation: earlier periods open"
    );
    assert_eq!(
        AppError::InvalidState("already closed".into()).to_string(),
        "Invalid state: already closed"
    );
}
