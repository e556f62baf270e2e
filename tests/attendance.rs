mod common;

use chrono::{Duration, Utc};
use common::{SharedStore, unreachable_api};
use ems_client::attendance::{AUTO_CHECKOUT_NOTICE, AttendanceTracker};
use ems_client::model::attendance::{
    AttendanceStatus, CheckMethod, Outcome, PersistedAttendance, STATUS_CHECKED_IN,
};
use ems_client::store::{ATTENDANCE_KEY, KvStore};

fn tracker_over(store: &SharedStore) -> AttendanceTracker {
    AttendanceTracker::new(unreachable_api(), Box::new(store.clone()), 2)
}

fn persist_checked_in(store: &SharedStore, since: chrono::DateTime<Utc>) {
    let blob = serde_json::to_string(&PersistedAttendance {
        status: STATUS_CHECKED_IN.to_string(),
        time: since,
    })
    .unwrap();
    store.clone().set(ATTENDANCE_KEY, &blob);
}

#[tokio::test]
async fn check_in_then_check_out_appends_one_manual_entry() {
    let store = SharedStore::new();
    let mut tracker = tracker_over(&store);
    assert_eq!(tracker.status(), AttendanceStatus::CheckedOut);

    tracker.check_in(Some("23.8103, 90.4125".to_string()), None).await;
    assert!(matches!(tracker.status(), AttendanceStatus::CheckedIn { .. }));
    assert!(store.get(ATTENDANCE_KEY).is_some());

    let entry = tracker.check_out(None).await.expect("entry appended");
    assert_eq!(entry.method, CheckMethod::Manual);
    assert_eq!(entry.outcome, Outcome::Present);
    assert_eq!(entry.location.as_deref(), Some("23.8103, 90.4125"));

    assert_eq!(tracker.log().len(), 1);
    assert_eq!(tracker.status(), AttendanceStatus::CheckedOut);
    assert!(store.get(ATTENDANCE_KEY).is_none());
}

#[tokio::test]
async fn repeated_check_in_keeps_original_timestamp() {
    let store = SharedStore::new();
    let mut tracker = tracker_over(&store);

    tracker.check_in(None, None).await;
    let AttendanceStatus::CheckedIn { since: first } = tracker.status() else {
        panic!("expected checked-in");
    };

    tracker.check_in(None, None).await;
    assert_eq!(tracker.status(), AttendanceStatus::CheckedIn { since: first });
}

#[tokio::test]
async fn check_out_without_check_in_is_a_no_op() {
    let store = SharedStore::new();
    let mut tracker = tracker_over(&store);
    assert!(tracker.check_out(None).await.is_none());
    assert!(tracker.log().is_empty());
}

#[tokio::test]
async fn stale_persisted_session_is_auto_checked_out_on_sweep() {
    let store = SharedStore::new();
    let since = Utc::now() - Duration::hours(3);
    persist_checked_in(&store, since);

    let mut tracker = tracker_over(&store);
    let notice = tracker.sweep().expect("stale session closed");
    assert_eq!(notice, AUTO_CHECKOUT_NOTICE);

    assert_eq!(tracker.status(), AttendanceStatus::CheckedOut);
    assert_eq!(tracker.log().len(), 1);
    let entry = &tracker.log()[0];
    assert_eq!(entry.method, CheckMethod::Auto);
    assert_eq!(entry.check_out, "Auto-Checkout");
    assert!(store.get(ATTENDANCE_KEY).is_none());
}

#[tokio::test]
async fn fresh_persisted_session_is_restored_unchanged() {
    let store = SharedStore::new();
    let since = Utc::now() - Duration::minutes(30);
    persist_checked_in(&store, since);

    let mut tracker = tracker_over(&store);
    assert!(tracker.sweep().is_none());

    assert_eq!(tracker.status(), AttendanceStatus::CheckedIn { since });
    assert!(tracker.log().is_empty());
    assert!(store.get(ATTENDANCE_KEY).is_some());
}

#[tokio::test]
async fn elapsed_exactly_at_threshold_stays_checked_in() {
    let store = SharedStore::new();
    let now = Utc::now();
    let since = now - Duration::hours(2);
    persist_checked_in(&store, since);

    let mut tracker = tracker_over(&store);
    // strictly-greater comparison: the boundary does not auto-check out
    assert!(tracker.sweep_at(now).is_none());
    assert_eq!(tracker.status(), AttendanceStatus::CheckedIn { since });
}

#[tokio::test]
async fn offline_history_prepends_local_cycles_to_fallback() {
    let store = SharedStore::new();
    let mut tracker = tracker_over(&store);

    tracker.check_in(None, None).await;
    tracker.check_out(None).await;

    let history = tracker.history(None).await;
    // one local cycle plus the fixed three-entry fallback, newest first
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].method, CheckMethod::Manual);
    assert_eq!(history[1].method, CheckMethod::Gps);
    assert_eq!(history[1].date, "2023-10-24");
}
