//! Leave requests. Unlike the session and attendance components, a failed
//! submission is surfaced to the caller rather than papered over with
//! synthetic data: fabricating an accepted leave request would be worse
//! than reporting the outage. Listing keeps the fetch-with-fallback shape.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{ApiClient, leave as remote};
use crate::error::Result;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};

pub struct LeaveManager {
    api: ApiClient,
}

impl LeaveManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current request list, newest first as the backend orders it. Falls
    /// back to a fixed two-item dataset when the backend is unreachable;
    /// nothing is cached between calls.
    pub async fn list(&self, token: Option<&str>) -> Vec<LeaveRequest> {
        match remote::list(&self.api, token).await {
            Ok(requests) => requests,
            Err(e) => {
                warn!(error = %e, "Failed to fetch leaves, using fallback data");
                fallback_requests()
            }
        }
    }

    /// Submits a new request. On success the list is re-read from the
    /// backend and returned; there is no optimistic local insert. On
    /// failure the error propagates to the caller.
    pub async fn submit(
        &self,
        request: &NewLeaveRequest,
        token: Option<&str>,
    ) -> Result<Vec<LeaveRequest>> {
        remote::submit(&self.api, request, token).await?;
        info!(leave_type = %request.leave_type, "Leave request submitted");
        Ok(self.list(token).await)
    }

    /// Cancels a pending request. Surfaced-failure semantics like
    /// [`submit`].
    pub async fn cancel(&self, id: &str, token: Option<&str>) -> Result<()> {
        remote::cancel(&self.api, id, token).await?;
        info!(id, "Leave request cancelled");
        Ok(())
    }
}

fn fallback_requests() -> Vec<LeaveRequest> {
    vec![
        LeaveRequest {
            id: "1".to_string(),
            leave_type: LeaveType::Vacation,
            start_date: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
            status: LeaveStatus::Approved,
            reason: "Family trip".to_string(),
        },
        LeaveRequest {
            id: "2".to_string(),
            leave_type: LeaveType::Sick,
            start_date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 10, 16).unwrap(),
            status: LeaveStatus::Pending,
            reason: "Flu".to_string(),
        },
    ]
}
