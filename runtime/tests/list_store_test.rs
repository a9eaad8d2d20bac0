//! Store-driven list screen tests

#![allow(clippy::unwrap_used)] // Tests can unwrap

use expo_admin_core::view::{ListAction, ListEnvironment, ListReducer, ListState};
use expo_admin_runtime::Store;
use expo_admin_testing::{FailingSource, InMemoryFlagSource, InMemoryRecordSource, TestRecord, list_environment};
use std::sync::Arc;

fn schedule() -> Vec<TestRecord> {
    vec![
        TestRecord::new("c1", "Rust in Production").on("2024-11-20").category("public"),
        TestRecord::new("c2", "Cold Chain Logistics").on("2024-11-20").category("private"),
        TestRecord::new("c1", "Rust in Production").on("2024-11-21").category("public"),
        TestRecord::new("c3", "Async Rust").on("2024-11-21").category("public"),
        TestRecord::new("c4", "Retail Trends").on("2024-11-22").category("public"),
    ]
}

#[tokio::test]
async fn test_load_feeds_records_back() {
    let store = Store::new(ListState::new(10), ListReducer::new(), list_environment(schedule()));

    let reduced = store.send(ListAction::Load).await;

    assert_eq!(reduced, 2);
    let (loading, raw, visible) = store
        .state(|s| (s.loading, s.records.len(), s.visible().len()))
        .await;
    assert!(!loading);
    assert_eq!(raw, 5);
    assert_eq!(visible, 4);
}

#[tokio::test]
async fn test_load_with_flags_then_only_reserved() {
    let env = ListEnvironment::<TestRecord>::new(Arc::new(InMemoryRecordSource::new(schedule())))
        .with_flags(Arc::new(InMemoryFlagSource::new(vec!["c3".to_string(), "c4".to_string()])));
    let store = Store::new(ListState::new(10), ListReducer::new(), env);

    assert_eq!(store.send(ListAction::Load).await, 3);
    store.send(ListAction::SetOnlyFlagged(true)).await;

    let ids: Vec<String> = store
        .state(|s| s.visible().iter().map(|r| r.id.clone()).collect())
        .await;
    assert_eq!(ids, vec!["c3", "c4"]);
}

#[tokio::test]
async fn test_failed_load_reports_error() {
    let env = ListEnvironment::<TestRecord>::new(Arc::new(FailingSource::new("503 from upstream")));
    let store = Store::new(ListState::new(10), ListReducer::new(), env);

    store.send(ListAction::Load).await;

    let (loading, error) = store.state(|s| (s.loading, s.last_error.clone())).await;
    assert!(!loading);
    assert_eq!(error.as_deref(), Some("503 from upstream"));
}

#[tokio::test]
async fn test_failed_flags_leave_records_usable() {
    let env = ListEnvironment::<TestRecord>::new(Arc::new(InMemoryRecordSource::new(schedule())))
        .with_flags(Arc::new(FailingSource::new("participant not found")));
    let store = Store::new(ListState::new(10), ListReducer::new(), env);

    store.send(ListAction::Load).await;

    let (records, last_error, flags_error) = store
        .state(|s| (s.records.len(), s.last_error.clone(), s.flags_error.clone()))
        .await;
    assert_eq!(records, 5);
    assert_eq!(last_error, None);
    assert_eq!(flags_error.as_deref(), Some("participant not found"));
}

#[tokio::test]
async fn test_refresh_picks_up_new_records() {
    let source = Arc::new(InMemoryRecordSource::new(schedule()));
    let env = ListEnvironment::<TestRecord>::new(source.clone());
    let store = Store::new(ListState::new(2), ListReducer::new(), env);

    store.send(ListAction::Load).await;
    store.send(ListAction::GoToPage(2)).await;
    assert_eq!(store.state(|s| s.page).await, 2);

    source.set_records(schedule().into_iter().take(2).collect());
    store.send(ListAction::Load).await;

    assert_eq!(source.fetch_count(), 2);
    let page = store.state(|s| s.render_table().window.clone()).await;
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn test_sections_group_by_date() {
    let store = Store::new(ListState::new(10), ListReducer::new(), list_environment(schedule()));
    store.send(ListAction::Load).await;
    store.send(ListAction::SetKeyword("rust".to_string())).await;

    let sections: Vec<(String, usize)> = store
        .state(|s| {
            s.render_sections(|r| r.date)
                .into_iter()
                .map(|section| (section.key.unwrap().to_string(), section.rows.len()))
                .collect()
        })
        .await;

    assert_eq!(
        sections,
        vec![("2024-11-20".to_string(), 1), ("2024-11-21".to_string(), 1)]
    );
}
