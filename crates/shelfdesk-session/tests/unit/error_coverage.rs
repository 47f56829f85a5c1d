//! Errors surfaced by sessions.

use shelfdesk_core::Error;

#[test]
fn test_session_closed() {
    let err = Error::SessionClosed;
    assert_eq!(err.to_string(), "Edit session closed");
    assert!(!err.is_retryable());
}

#[test]
fn test_timeout_is_retryable() {
    let err = Error::Timeout { seconds: 30 };
    assert_eq!(err.to_string(), "Save timed out after 30s");
    assert!(err.is_retryable());
}

#[test]
fn test_config_error() {
    let err = Error::config("option_page_size must be greater than 0");
    assert!(err.to_string().starts_with("Configuration error"));
    assert!(!err.is_retryable());
}

#[test]
fn test_required_field() {
    let err = Error::validation_field("borrowDate", "This field is required.");
    let Error::Validation { field, message } = err else {
        unreachable!()
    };
    assert_eq!(field.as_deref(), Some("borrowDate"));
    assert_eq!(message, "This field is required.");
}
