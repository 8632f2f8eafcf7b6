//! Session behavior against the in-memory store
//!
//! Each test drives the session the way the UI loop does: call an
//! operation, then feed completions from the channel back into `apply`
//! until nothing is pending.

use super::*;
use crate::model::{TrainingId, TrainingRecord, TrainingType, Weekday};
use crate::store::{MemoryStore, StoreCall, StoreError, TrainingStore};
use std::sync::Arc;

fn record(id: i64, day: Weekday, kind: TrainingType) -> TrainingRecord {
    TrainingRecord {
        id: TrainingId(id),
        day,
        kind,
        date: "01/01/2024".to_string(),
    }
}

fn setup(records: Vec<TrainingRecord>) -> (Session, mpsc::Receiver<StoreEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_records(records).with_date("15/06/2024"));
    let (session, rx) = Session::with_channel(store.clone());
    (session, rx, store)
}

/// Apply completions until no gateway call is in flight
async fn settle(session: &mut Session, rx: &mut mpsc::Receiver<StoreEvent>) {
    while session.pending() > 0 {
        let event = rx.recv().await.expect("event channel closed");
        session.apply(event);
    }
}

/// Base set from the worked example: one Monday cardio with id 3
async fn loaded_example() -> (Session, mpsc::Receiver<StoreEvent>, Arc<MemoryStore>) {
    let (mut session, mut rx, store) =
        setup(vec![record(3, Weekday::Segunda, TrainingType::Cardio)]);
    session.initialize();
    settle(&mut session, &mut rx).await;
    (session, rx, store)
}

// ─────────────────────────────────────────────────────────────────────────────
// Initialize
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_loads_records() {
    let (mut session, mut rx, _store) = setup(vec![
        record(1, Weekday::Domingo, TrainingType::Peito),
        record(2, Weekday::Terca, TrainingType::Costas),
    ]);

    session.initialize();
    assert!(session.state().is_loading);

    settle(&mut session, &mut rx).await;
    assert!(!session.state().is_loading);
    let ids: Vec<_> = session.state().records.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_initialize_failure_leaves_records_empty() {
    let (mut session, mut rx, store) =
        setup(vec![record(1, Weekday::Domingo, TrainingType::Peito)]);
    store.fail_next(1, StoreError::Transport("offline".to_string()));

    session.initialize();
    settle(&mut session, &mut rx).await;

    assert!(!session.state().is_loading);
    assert!(session.state().records.is_empty());
    // No retry
    assert_eq!(store.calls(), vec![StoreCall::ListAll]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Add flow
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_worked_example_submit() {
    let (mut session, mut rx, store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Quarta);
    session.select_type(TrainingType::Cardio);
    assert!(session.submit());
    settle(&mut session, &mut rx).await;

    assert!(store
        .calls()
        .contains(&StoreCall::Insert(Weekday::Quarta, TrainingType::Cardio)));
    assert_eq!(session.state().derived_counts()[&TrainingType::Cardio], 2);

    let state = session.state();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.selected_day, None);
    assert_eq!(state.selected_type, None);
    assert!(!state.is_adding_mode);
}

#[tokio::test]
async fn test_submit_every_pair_adds_exactly_one_record() {
    for day in Weekday::ALL {
        for kind in TrainingType::ALL {
            let (mut session, mut rx, _store) =
                setup(vec![record(1, Weekday::Sabado, TrainingType::Ombros)]);
            session.initialize();
            settle(&mut session, &mut rx).await;
            let before = session.state().records.clone();

            session.begin_add();
            session.select_day(day);
            session.select_type(kind);
            assert!(session.submit());
            settle(&mut session, &mut rx).await;

            let after = &session.state().records;
            let new: Vec<_> = after.iter().filter(|r| !before.contains(r)).collect();
            assert_eq!(new.len(), 1, "{} / {}", day, kind);
            assert_eq!(new[0].day, day);
            assert_eq!(new[0].kind, kind);
            assert_eq!(new[0].date, "15/06/2024");
        }
    }
}

#[tokio::test]
async fn test_submit_without_selection_is_noop() {
    let (mut session, _rx, store) = loaded_example().await;
    let calls_before = store.calls();

    // Day only
    session.begin_add();
    session.select_day(Weekday::Quinta);
    let before = session.snapshot();
    assert!(!session.submit());
    assert_eq!(session.pending(), 0);
    assert_eq!(session.snapshot(), before);

    // Type only
    let (mut only_type, _rx2, store2) = setup(vec![]);
    only_type.begin_add();
    only_type.select_type(TrainingType::Pernas);
    let before = only_type.snapshot();
    assert!(!only_type.submit());
    assert_eq!(only_type.pending(), 0);
    assert_eq!(only_type.snapshot(), before);

    assert_eq!(store.calls(), calls_before);
    assert!(store2.calls().is_empty());
}

#[tokio::test]
async fn test_form_closes_only_after_reload() {
    let (mut session, mut rx, _store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Sexta);
    session.select_type(TrainingType::Bracos);
    session.submit();

    // Insert completes: reload starts, form still open
    let inserted = rx.recv().await.unwrap();
    assert!(matches!(inserted, StoreEvent::Inserted { result: Ok(()), .. }));
    session.apply(inserted);
    assert!(session.state().is_loading);
    assert!(session.state().is_adding_mode);
    assert_eq!(session.state().selected_day, Some(Weekday::Sexta));

    // Reload completes: form cleared
    let fetched = rx.recv().await.unwrap();
    assert!(matches!(
        fetched,
        StoreEvent::Fetched {
            reason: FetchReason::AfterInsert,
            ..
        }
    ));
    session.apply(fetched);
    assert!(!session.state().is_loading);
    assert!(!session.state().is_adding_mode);
    assert_eq!(session.state().selected_day, None);
}

#[tokio::test]
async fn test_insert_failure_leaves_state_untouched() {
    let (mut session, mut rx, store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Domingo);
    session.select_type(TrainingType::Peito);
    let before = session.snapshot();

    store.fail_next(1, StoreError::Server {
        status: 500,
        message: "boom".to_string(),
    });
    assert!(session.submit());
    settle(&mut session, &mut rx).await;

    assert_eq!(session.snapshot(), before);
    assert!(session.state().is_adding_mode);
    // No reload after a failed insert
    assert_eq!(store.calls().last(), Some(&StoreCall::Insert(Weekday::Domingo, TrainingType::Peito)));
}

#[tokio::test]
async fn test_reload_failure_after_insert_still_clears_form() {
    let (mut session, mut rx, store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Terca);
    session.select_type(TrainingType::Costas);
    session.submit();

    let inserted = rx.recv().await.unwrap();
    store.fail_next(1, StoreError::Transport("offline".to_string()));
    session.apply(inserted);
    settle(&mut session, &mut rx).await;

    // Stale list kept, form cleared, loading over
    assert_eq!(session.state().records.len(), 1);
    assert!(!session.state().is_adding_mode);
    assert!(!session.state().is_loading);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_cancel_keeps_selections() {
    let (mut session, mut rx, _store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Quarta);
    session.select_type(TrainingType::Pernas);
    session.cancel_add();

    assert!(!session.state().is_adding_mode);
    assert_eq!(session.state().selected_day, Some(Weekday::Quarta));
    assert_eq!(session.state().selected_type, Some(TrainingType::Pernas));

    session.begin_add();
    assert!(session.state().can_submit());
    settle(&mut session, &mut rx).await;
}

#[tokio::test]
async fn test_double_submit_issues_two_inserts() {
    let (mut session, mut rx, store) = loaded_example().await;

    session.begin_add();
    session.select_day(Weekday::Quinta);
    session.select_type(TrainingType::Ombros);
    assert!(session.submit());
    assert!(session.submit());
    settle(&mut session, &mut rx).await;

    let inserts = store
        .calls()
        .into_iter()
        .filter(|c| matches!(c, StoreCall::Insert(..)))
        .count();
    assert_eq!(inserts, 2);
    assert_eq!(session.state().records, store.snapshot());
    assert_eq!(session.state().records.len(), 3);
    assert!(!session.state().is_loading);
}

// ─────────────────────────────────────────────────────────────────────────────
// Remove
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_worked_example_remove() {
    let (mut session, mut rx, store) = loaded_example().await;

    session.remove(TrainingId(3));
    settle(&mut session, &mut rx).await;

    assert!(session.state().records.is_empty());
    assert!(session.state().grouped_by_day().iter().all(|g| g.is_empty()));
    assert!(store.calls().contains(&StoreCall::Delete(TrainingId(3))));
}

#[tokio::test]
async fn test_remove_leaves_other_records_unchanged() {
    let (mut session, mut rx, _store) = setup(vec![
        record(1, Weekday::Domingo, TrainingType::Peito),
        record(2, Weekday::Segunda, TrainingType::Costas),
        record(3, Weekday::Terca, TrainingType::Pernas),
    ]);
    session.initialize();
    settle(&mut session, &mut rx).await;
    let before = session.snapshot().records;

    session.remove(TrainingId(2));
    settle(&mut session, &mut rx).await;

    let after = &session.state().records;
    assert!(after.iter().all(|r| r.id != TrainingId(2)));
    let expected: Vec<_> = before.into_iter().filter(|r| r.id != TrainingId(2)).collect();
    assert_eq!(after, &expected);
}

#[tokio::test]
async fn test_remove_missing_id_leaves_state_unchanged() {
    let (mut session, mut rx, store) = loaded_example().await;
    let before = session.snapshot();

    session.remove(TrainingId(99));
    settle(&mut session, &mut rx).await;

    assert_eq!(session.snapshot(), before);
    // Failed delete does not trigger a reload
    assert_eq!(store.calls().last(), Some(&StoreCall::Delete(TrainingId(99))));
}

// ─────────────────────────────────────────────────────────────────────────────
// Reload and loading flag
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_loading_stays_on_until_last_fetch_applied() {
    let (mut session, mut rx, _store) = setup(vec![]);

    session.initialize();
    session.reload();
    assert_eq!(session.pending(), 2);

    let first = rx.recv().await.unwrap();
    session.apply(first);
    assert!(session.state().is_loading);

    let second = rx.recv().await.unwrap();
    session.apply(second);
    assert!(!session.state().is_loading);
}

#[tokio::test]
async fn test_manual_reload_picks_up_external_changes() {
    let (mut session, mut rx, store) = loaded_example().await;

    // Another client writes directly to the store
    store.insert(Weekday::Sabado, TrainingType::Cardio).await.unwrap();
    assert_eq!(session.state().records.len(), 1);

    session.reload();
    settle(&mut session, &mut rx).await;
    assert_eq!(session.state().records.len(), 2);
    assert_eq!(session.state().derived_counts()[&TrainingType::Cardio], 2);
}
