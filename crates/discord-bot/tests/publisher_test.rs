use async_trait::async_trait;
use chrono::TimeZone;
use chrono_tz::Asia::Jakarta;
use eyre::eyre;
use mockall::{mock, predicate::eq};
use pretty_assertions::assert_eq;
use rfslot_core::{
    models::ledger::SlotLedger,
    render::{Renderer, StatusView},
};
use rfslot_db::mock::repositories::MockMessageHandleRepo;
use rfslot_discord_bot::publisher::{EditOutcome, Published, Publisher, StatusBoard};
use std::sync::Arc;

mock! {
    pub Board {}

    #[async_trait]
    impl StatusBoard for Board {
        async fn send(&self, view: &StatusView) -> eyre::Result<u64>;
        async fn edit(&self, message_id: u64, view: &StatusView) -> eyre::Result<EditOutcome>;
    }
}

fn view() -> StatusView {
    let now = Jakarta
        .with_ymd_and_hms(2026, 10, 19, 10, 0, 0)
        .single()
        .expect("valid Jakarta time");
    Renderer::new(Jakarta).render(&SlotLedger::new(), &now)
}

#[tokio::test]
async fn test_first_publish_sends_and_stores_handle() {
    let mut handles = MockMessageHandleRepo::new();
    handles.expect_load().times(1).returning(|| Ok(None));
    handles
        .expect_save()
        .with(eq(501))
        .times(1)
        .returning(|_| Ok(()));

    let mut board = MockBoard::new();
    board.expect_edit().never();
    board.expect_send().times(1).returning(|_| Ok(501));

    let publisher = Publisher::new(Arc::new(handles));
    let published = publisher.publish(&board, &view()).await.unwrap();

    assert_eq!(published, Published::Sent(501));
    assert_eq!(published.message_id(), 501);
}

#[tokio::test]
async fn test_existing_message_is_edited_in_place() {
    let mut handles = MockMessageHandleRepo::new();
    handles.expect_load().times(1).returning(|| Ok(Some(42)));
    handles.expect_save().never();

    let mut board = MockBoard::new();
    board.expect_send().never();
    board
        .expect_edit()
        .withf(|message_id, _| *message_id == 42)
        .times(1)
        .returning(|_, _| Ok(EditOutcome::Edited));

    let publisher = Publisher::new(Arc::new(handles));
    let published = publisher.publish(&board, &view()).await.unwrap();

    assert_eq!(published, Published::Edited(42));
}

#[tokio::test]
async fn test_deleted_message_is_replaced() {
    let mut handles = MockMessageHandleRepo::new();
    handles.expect_load().times(1).returning(|| Ok(Some(42)));
    handles
        .expect_save()
        .with(eq(77))
        .times(1)
        .returning(|_| Ok(()));

    let mut board = MockBoard::new();
    board
        .expect_edit()
        .times(1)
        .returning(|_, _| Ok(EditOutcome::Missing));
    board.expect_send().times(1).returning(|_| Ok(77));

    let publisher = Publisher::new(Arc::new(handles));
    let published = publisher.publish(&board, &view()).await.unwrap();

    assert_eq!(
        published,
        Published::Resent {
            stale: 42,
            message_id: 77
        }
    );
    assert_eq!(published.message_id(), 77);
}

#[tokio::test]
async fn test_edit_failure_is_not_treated_as_missing() {
    let mut handles = MockMessageHandleRepo::new();
    handles.expect_load().returning(|| Ok(Some(42)));
    handles.expect_save().never();

    let mut board = MockBoard::new();
    board
        .expect_edit()
        .returning(|_, _| Err(eyre!("503 Service Unavailable")));
    board.expect_send().never();

    let publisher = Publisher::new(Arc::new(handles));
    let result = publisher.publish(&board, &view()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unreadable_handle_stops_publish() {
    let mut handles = MockMessageHandleRepo::new();
    handles
        .expect_load()
        .returning(|| Err(eyre!("corrupt monitor_message.json")));

    let mut board = MockBoard::new();
    board.expect_send().never();
    board.expect_edit().never();

    let publisher = Publisher::new(Arc::new(handles));
    assert!(publisher.publish(&board, &view()).await.is_err());
}

#[tokio::test]
async fn test_send_failure_keeps_old_handle() {
    let mut handles = MockMessageHandleRepo::new();
    handles.expect_load().returning(|| Ok(None));
    handles.expect_save().never();

    let mut board = MockBoard::new();
    board
        .expect_send()
        .returning(|_| Err(eyre!("Missing Permissions")));

    let publisher = Publisher::new(Arc::new(handles));
    assert!(publisher.publish(&board, &view()).await.is_err());
}
