//! Saving borrow sessions.

use crate::common::*;
use shelfdesk_core::{Borrow, Entity, EntityService, Error, TimeoutService};
use shelfdesk_forms::BorrowFormAdapter;
use shelfdesk_session::{BorrowOptionSources, EditSession, SessionPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[tokio::test]
async fn test_existing_record_is_updated() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    let saved = session.save().await.unwrap();

    assert_eq!(saved, sample_borrow());
    assert_eq!(fixture.borrows.calls(), vec![Call::Update(Some(BORROW_ID))]);
    assert_eq!(session.phase(), SessionPhase::Saved);
    assert!(!session.is_saving());
}

#[tokio::test]
async fn test_new_record_is_created_with_defaults() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();

    let before = chrono::Utc::now() - chrono::Duration::minutes(1);
    session.initialize(None).await.unwrap();

    let form = session.form();
    assert!(form.is_new());
    assert!(form.fields.borrow_date.is_some());
    assert!(form.fields.return_date.is_some());

    let saved = session.save().await.unwrap();

    assert_eq!(fixture.borrows.calls(), vec![Call::Create(None)]);
    assert!(saved.id().is_some());
    assert!(saved.borrow_date.unwrap() >= before);
    assert_eq!(session.phase(), SessionPhase::Saved);
    assert_eq!(session.record(), Some(saved));
}

#[tokio::test]
async fn test_edits_flow_into_saved_record() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    session
        .update_form(|fields| fields.return_date = Some("2024-03-15T17:45".to_string()))
        .unwrap();
    let saved = session.save().await.unwrap();

    assert_eq!(saved.return_date, Some(instant(15, 17, 45)));
    assert_eq!(saved.borrow_date, Some(instant(1, 9, 30)));
}

#[tokio::test]
async fn test_unreadable_date_saves_as_none() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    session
        .update_form(|fields| fields.borrow_date = Some("next tuesday".to_string()))
        .unwrap();
    assert!(session.is_valid());
    let saved = session.save().await.unwrap();

    assert_eq!(saved.borrow_date, None);
}

#[tokio::test]
async fn test_saving_flag_spans_the_write() {
    let gate = Arc::new(Notify::new());
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]).with_save_gate(gate.clone()),
        RecordingService::new(Vec::new()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    let pending = session.save();
    assert!(session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Saving);

    let handle = tokio::spawn(pending);
    gate.notify_one();
    handle.await.unwrap().unwrap();

    assert!(!session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Saved);
}

#[tokio::test]
async fn test_failed_save_returns_to_ready_with_edits() {
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]).failing_saves(),
        RecordingService::new(Vec::new()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();
    session
        .update_form(|fields| fields.return_date = Some("2024-03-20T12:00".to_string()))
        .unwrap();
    let edited = session.form();

    let err = session.save().await.unwrap_err();

    let Error::Service { message, .. } = err else {
        unreachable!()
    };
    assert_eq!(message, "store unavailable");
    assert!(!session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.form(), edited);
    assert_eq!(session.record(), Some(sample_borrow()));
}

#[tokio::test]
async fn test_failed_create_clears_flag() {
    let fixture = BorrowFixture::with_services(
        RecordingService::new(Vec::new()).failing_saves(),
        RecordingService::new(Vec::new()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();
    session.initialize(None).await.unwrap();

    assert!(session.save().await.is_err());

    assert_eq!(fixture.borrows.calls(), vec![Call::Create(None)]);
    assert!(!session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_retry_after_failure_goes_through_ready() {
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]).failing_saves(),
        RecordingService::new(Vec::new()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    assert!(session.save().await.is_err());
    assert!(session.save().await.is_err());

    assert_eq!(
        fixture.borrows.calls(),
        vec![Call::Update(Some(BORROW_ID)), Call::Update(Some(BORROW_ID))]
    );
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_dropped_save_clears_flag() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    let pending = session.save();
    assert!(session.is_saving());
    drop(pending);

    assert!(!session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(fixture.borrows.calls().is_empty());
}

#[tokio::test]
async fn test_save_after_saved_is_rejected() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();
    session.save().await.unwrap();

    assert!(matches!(session.save().await, Err(Error::SessionClosed)));
    assert_eq!(fixture.borrows.calls().len(), 1);
}

#[tokio::test]
async fn test_close_during_save_discards_result() {
    let gate = Arc::new(Notify::new());
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]).with_save_gate(gate.clone()),
        RecordingService::new(Vec::new()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();
    session.initialize(Some(sample_borrow())).await.unwrap();

    let handle = tokio::spawn(session.save());
    session.close();
    gate.notify_one();
    handle.await.unwrap().unwrap();

    assert_eq!(session.phase(), SessionPhase::Closed);
    assert!(!session.is_saving());
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_save_returns_to_ready() {
    let stalled = Arc::new(
        RecordingService::new(vec![sample_borrow()]).with_save_gate(Arc::new(Notify::new())),
    );
    let service: Arc<dyn EntityService<Borrow>> =
        Arc::new(TimeoutService::new(stalled.clone(), Duration::from_secs(5)));
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = EditSession::new(
        BorrowFormAdapter::new(),
        service,
        BorrowOptionSources::new(fixture.members.clone(), fixture.books.clone()),
    );
    session.initialize(Some(sample_borrow())).await.unwrap();

    let err = session.save().await.unwrap_err();

    assert!(matches!(err, Error::Timeout { seconds: 5 }));
    assert!(err.is_retryable());
    assert!(!session.is_saving());
    assert_eq!(session.phase(), SessionPhase::Ready);
}
