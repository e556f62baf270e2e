mod common;

use chrono::NaiveDate;
use common::unreachable_api;
use ems_client::error::Error;
use ems_client::leave::LeaveManager;
use ems_client::model::leave_request::{LeaveStatus, LeaveType, NewLeaveRequest};

fn offline_manager() -> LeaveManager {
    LeaveManager::new(unreachable_api())
}

#[tokio::test]
async fn offline_list_returns_fixed_fallback() {
    let manager = offline_manager();
    let requests = manager.list(None).await;

    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].leave_type, LeaveType::Vacation);
    assert_eq!(requests[0].status, LeaveStatus::Approved);
    assert_eq!(requests[1].leave_type, LeaveType::Sick);
    assert_eq!(requests[1].status, LeaveStatus::Pending);
}

#[tokio::test]
async fn list_is_idempotent_without_intervening_submission() {
    let manager = offline_manager();
    let first = manager.list(None).await;
    let second = manager.list(None).await;

    let ids = |reqs: &[ems_client::model::leave_request::LeaveRequest]| {
        reqs.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[tokio::test]
async fn failed_submission_surfaces_error_and_leaves_list_untouched() {
    let manager = offline_manager();
    let before = manager.list(None).await;

    let result = manager
        .submit(
            &NewLeaveRequest {
                leave_type: LeaveType::Personal,
                start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
                reason: "Moving apartments".to_string(),
            },
            None,
        )
        .await;

    assert!(matches!(result, Err(Error::RemoteUnavailable(_))));

    // No optimistic insert: the next read still shows the source of truth.
    let after = manager.list(None).await;
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
async fn failed_cancel_surfaces_error() {
    let manager = offline_manager();
    let result = manager.cancel("1", None).await;
    assert!(matches!(result, Err(Error::RemoteUnavailable(_))));
}
