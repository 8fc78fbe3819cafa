//! Fetch cycle, failure handling, delete-triggered refresh and stale-cycle rejection.

use crate::common::{init_logging, logged, raw_tx, response, FakeBackend, FetchStep};
use finance_dashboard_core::{
    AugmentedBalance, DashboardController, Phase, RawAmount, TransactionKind, LOAD_ERROR_MESSAGE,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn two_transactions() -> FetchStep {
    FetchStep::ok(response(
        vec![
            raw_tx("t1", "Salary", 500.0, TransactionKind::Income, "2020-04-30T12:00:00.000Z"),
            raw_tx("t2", "Rent", 200.0, TransactionKind::Outcome, "2020-04-29T09:00:00.000Z"),
        ],
        500.0,
        200.0,
        300.0,
    ))
}

#[tokio::test]
async fn mount_commits_normalized_snapshot() {
    let backend = FakeBackend::new();
    backend.push_fetch(two_transactions());
    let dashboard = DashboardController::new(backend.clone());

    dashboard.mount().await;

    let state = dashboard.state();
    assert_eq!(state.phase, Phase::Loaded);
    assert!(state.loaded);
    assert_eq!(state.error, None);
    assert_eq!(
        state.balance,
        Some(AugmentedBalance {
            income: "500,00".to_string(),
            outcome: "200,00".to_string(),
            total: "300,00".to_string(),
        })
    );
    let ids: Vec<&str> = state.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    assert_eq!(state.transactions[0].formatted_date, "30/04/2020");
    assert_eq!(state.transactions[1].display_value(), "- 200,00");
    assert_eq!(backend.fetch_calls(), 1);
}

#[tokio::test]
async fn first_load_failure_sets_error_without_loaded() {
    init_logging();
    let backend = FakeBackend::new();
    backend.push_fetch(FetchStep::status(500));
    let dashboard = DashboardController::new(backend);

    dashboard.mount().await;

    let state = dashboard.state();
    assert_eq!(state.phase, Phase::Failed);
    assert!(!state.loaded);
    assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    assert!(state.transactions.is_empty());
    assert_eq!(state.balance, None);
}

#[tokio::test]
async fn unparseable_date_fails_cycle_and_keeps_previous_snapshot() {
    init_logging();
    let backend = FakeBackend::new();
    backend.push_fetch(two_transactions());
    backend.push_fetch(FetchStep::ok(response(
        vec![raw_tx("t9", "Broken", 1.0, TransactionKind::Income, "not-a-date")],
        1.0,
        0.0,
        1.0,
    )));
    let dashboard = DashboardController::new(backend);

    dashboard.mount().await;
    let before = dashboard.state();
    dashboard.refresh().await;
    let after = dashboard.state();

    assert_eq!(after.phase, Phase::Failed);
    assert!(after.loaded);
    assert_eq!(after.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    assert_eq!(after.transactions, before.transactions);
    assert_eq!(after.balance, before.balance);
    assert!(logged("unparseable date: \"not-a-date\""));
}

#[tokio::test]
async fn non_numeric_amount_fails_cycle() {
    let backend = FakeBackend::new();
    let mut bad = raw_tx("t1", "Lunch", 0.0, TransactionKind::Outcome, "2020-04-30");
    bad.value = RawAmount::Text("twelve".to_string());
    backend.push_fetch(FetchStep::ok(response(vec![bad], 0.0, 0.0, 0.0)));
    let dashboard = DashboardController::new(backend);

    dashboard.mount().await;

    let state = dashboard.state();
    assert_eq!(state.phase, Phase::Failed);
    assert!(state.transactions.is_empty());
}

#[tokio::test]
async fn successful_delete_triggers_exactly_one_refresh() {
    init_logging();
    let backend = FakeBackend::new();
    backend.push_fetch(two_transactions());
    backend.push_fetch(FetchStep::ok(response(
        vec![raw_tx("t2", "Rent", 200.0, TransactionKind::Outcome, "2020-04-29")],
        0.0,
        200.0,
        -200.0,
    )));
    let dashboard = DashboardController::new(backend.clone());
    dashboard.mount().await;

    dashboard.delete_transaction("t1").await;

    assert_eq!(backend.deletes(), vec!["t1".to_string()]);
    assert_eq!(backend.fetch_calls(), 2);
    let state = dashboard.state();
    assert!(state.transactions.iter().all(|t| t.id != "t1"));
    assert!(!state.refresh_pending);
    assert_eq!(state.balance.map(|b| b.total), Some("-200,00".to_string()));
}

#[tokio::test]
async fn failed_delete_is_logged_and_does_not_refresh() {
    init_logging();
    let backend = FakeBackend::new();
    backend.push_fetch(two_transactions());
    backend.fail_delete("t2");
    let dashboard = DashboardController::new(backend.clone());
    dashboard.mount().await;

    dashboard.delete_transaction("t2").await;

    assert_eq!(backend.fetch_calls(), 1);
    let state = dashboard.state();
    assert!(state.transactions.iter().any(|t| t.id == "t2"));
    assert!(!state.refresh_pending);
    assert!(logged("delete of transaction t2 failed"));
}

#[tokio::test]
async fn slower_older_cycle_cannot_overwrite_newer_one() {
    let backend = FakeBackend::new();
    backend.push_fetch(
        FetchStep::ok(response(
            vec![raw_tx("old", "Stale", 1.0, TransactionKind::Income, "2020-01-01")],
            1.0,
            0.0,
            1.0,
        ))
        .delayed(Duration::from_millis(100)),
    );
    backend.push_fetch(FetchStep::ok(response(
        vec![raw_tx("new", "Fresh", 2.0, TransactionKind::Income, "2020-01-02")],
        2.0,
        0.0,
        2.0,
    )));
    let dashboard = DashboardController::new(backend.clone());

    tokio::join!(dashboard.load(), dashboard.load());

    let state = dashboard.state();
    assert_eq!(backend.fetch_calls(), 2);
    assert_eq!(state.cycle, 2);
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions[0].id, "new");
    assert_eq!(state.balance.map(|b| b.total), Some("2,00".to_string()));
}

#[tokio::test]
async fn subscriber_sees_loaded_state_after_mount() {
    let backend = FakeBackend::new();
    backend.push_fetch(two_transactions());
    let dashboard = DashboardController::new(backend);
    let mut rx = dashboard.subscribe();

    dashboard.mount().await;

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert!(seen.loaded);
    assert_eq!(seen.transactions.len(), 2);
}
