//! Session phases and state defaults.

use shelfdesk_core::{Book, Borrow};
use shelfdesk_forms::{BookFields, BorrowFields};
use shelfdesk_session::{BorrowOptions, SessionPhase, SessionState};

#[test]
fn test_phase_names() {
    let phases = [
        (SessionPhase::Idle, "idle"),
        (SessionPhase::Loading, "loading"),
        (SessionPhase::Ready, "ready"),
        (SessionPhase::Saving, "saving"),
        (SessionPhase::Saved, "saved"),
        (SessionPhase::Closed, "closed"),
    ];
    for (phase, name) in phases {
        assert_eq!(phase.to_string(), name);
        assert_eq!(serde_json::to_string(&phase).unwrap(), format!("\"{name}\""));
    }
}

#[test]
fn test_only_saved_and_closed_are_terminal() {
    let terminal: Vec<_> = [
        SessionPhase::Idle,
        SessionPhase::Loading,
        SessionPhase::Ready,
        SessionPhase::Saving,
        SessionPhase::Saved,
        SessionPhase::Closed,
    ]
    .into_iter()
    .filter(SessionPhase::is_terminal)
    .collect();
    assert_eq!(terminal, vec![SessionPhase::Saved, SessionPhase::Closed]);
}

#[test]
fn test_default_state() {
    let state: SessionState<Borrow, BorrowFields, BorrowOptions> = SessionState::default();
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.record.is_none());
    assert!(state.form.is_new());
    assert_eq!(state.options, BorrowOptions::default());
    assert!(!state.saving);
}

#[test]
fn test_state_without_options() {
    let state: SessionState<Book, BookFields, ()> = SessionState::default();
    assert_eq!(state.form.fields, BookFields::default());
}
