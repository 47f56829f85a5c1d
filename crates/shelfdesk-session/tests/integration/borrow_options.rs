//! Option loading for borrow sessions.

use crate::common::*;
use shelfdesk_core::{Book, Entity, EntityId, Error, Member};
use shelfdesk_session::SessionPhase;
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::test]
async fn test_current_member_already_fetched_is_not_duplicated() {
    let fixture = BorrowFixture::new(vec![Member::reference(MEMBER_ID)], Vec::new());
    let session = fixture.session();

    session.initialize(Some(sample_borrow())).await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(ids(&session.options().members), vec![MEMBER_ID]);
}

#[tokio::test]
async fn test_current_member_is_prepended_when_missing() {
    let other = Member::reference(EntityId::new(999));
    let fixture = BorrowFixture::new(vec![other], vec![Book::reference(BOOK_ID)]);
    let session = fixture.session();

    session.initialize(Some(sample_borrow())).await.unwrap();

    let options = session.options();
    assert_eq!(
        ids(&options.members),
        vec![MEMBER_ID, EntityId::new(999)]
    );
    assert_eq!(ids(&options.books), vec![BOOK_ID]);
}

#[tokio::test]
async fn test_fetched_copy_is_favored_over_reference() {
    let fetched = Member::reference(MEMBER_ID).with_name("Ada Byron");
    let fixture = BorrowFixture::new(vec![fetched.clone()], Vec::new());
    let session = fixture.session();

    session.initialize(Some(sample_borrow())).await.unwrap();

    assert_eq!(session.options().members, vec![fetched]);
}

#[tokio::test]
async fn test_new_borrow_options_are_fetched_unchanged() {
    let members = vec![sample_member()];
    let fixture = BorrowFixture::new(members.clone(), Vec::new());
    let session = fixture.session();

    session.initialize(None).await.unwrap();

    let options = session.options();
    assert_eq!(options.members, members);
    assert!(options.books.is_empty());
    assert_eq!(fixture.members.calls(), vec![Call::List]);
    assert_eq!(fixture.books.calls(), vec![Call::List]);
}

#[tokio::test]
async fn test_options_apply_in_any_order() {
    let gate = Arc::new(Notify::new());
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]),
        RecordingService::new(vec![Member::reference(EntityId::new(999))])
            .with_list_gate(gate.clone()),
        RecordingService::new(vec![Book::reference(EntityId::new(17120))]),
    );
    let session = fixture.session();
    let mut rx = session.subscribe();

    let running = session.clone();
    let handle = tokio::spawn(async move { running.initialize(Some(sample_borrow())).await });

    rx.wait_for(|state| state.options.books.len() == 2).await.unwrap();
    assert_eq!(
        ids(&session.options().books),
        vec![BOOK_ID, EntityId::new(17120)]
    );
    // Seeded member is selectable before its list arrives.
    assert_eq!(ids(&session.options().members), vec![MEMBER_ID]);
    assert_eq!(session.phase(), SessionPhase::Loading);

    gate.notify_one();
    handle.await.unwrap().unwrap();

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(
        ids(&session.options().members),
        vec![MEMBER_ID, EntityId::new(999)]
    );
}

#[tokio::test]
async fn test_load_failure_keeps_loading_until_reload() {
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]),
        RecordingService::new(vec![sample_member()]).failing_lists(),
        RecordingService::new(vec![Book::reference(EntityId::new(17120))]),
    );
    let session = fixture.session();

    let err = session.initialize(Some(sample_borrow())).await.unwrap_err();
    assert!(matches!(err, Error::Service { .. }));
    assert_eq!(session.phase(), SessionPhase::Loading);
    // The other field's load still landed.
    assert_eq!(
        ids(&session.options().books),
        vec![BOOK_ID, EntityId::new(17120)]
    );

    fixture.members.set_fail_lists(false);
    session.reload_options().await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.options().members, vec![sample_member()]);
}

#[tokio::test]
async fn test_close_discards_late_results() {
    let gate = Arc::new(Notify::new());
    let fixture = BorrowFixture::with_services(
        RecordingService::new(vec![sample_borrow()]),
        RecordingService::new(vec![Member::reference(EntityId::new(999))])
            .with_list_gate(gate.clone()),
        RecordingService::new(Vec::new()),
    );
    let session = fixture.session();

    let running = session.clone();
    let handle = tokio::spawn(async move { running.initialize(Some(sample_borrow())).await });
    let mut rx = session.subscribe();
    rx.wait_for(|state| state.record.is_some()).await.unwrap();

    session.close();
    gate.notify_one();
    handle.await.unwrap().unwrap();

    assert_eq!(session.phase(), SessionPhase::Closed);
    assert_eq!(ids(&session.options().members), vec![MEMBER_ID]);
}

#[tokio::test]
async fn test_open_fetches_record_and_options() {
    let fixture = BorrowFixture::new(
        vec![Member::reference(EntityId::new(999))],
        vec![Book::reference(BOOK_ID)],
    );
    let session = fixture.session();

    session.open(BORROW_ID).await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.record(), Some(sample_borrow()));
    assert_eq!(session.form().id(), Some(BORROW_ID));
    assert_eq!(
        ids(&session.options().members),
        vec![MEMBER_ID, EntityId::new(999)]
    );
    assert_eq!(fixture.borrows.calls(), vec![Call::Get(BORROW_ID)]);
}

#[tokio::test]
async fn test_open_unknown_record_fails() {
    let fixture = BorrowFixture::new(Vec::new(), Vec::new());
    let session = fixture.session();

    let err = session.open(EntityId::new(1)).await.unwrap_err();

    assert!(matches!(err, Error::NotFound { entity: "borrow", .. }));
    assert_eq!(session.phase(), SessionPhase::Loading);
}
