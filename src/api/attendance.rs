use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ApiClient;
use crate::error::Result;
use crate::model::attendance::AttendanceLogEntry;

#[derive(Serialize)]
struct CheckInBody<'a> {
    time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

#[derive(Serialize)]
struct CheckOutBody {
    time: DateTime<Utc>,
}

pub async fn check_in(
    api: &ApiClient,
    time: DateTime<Utc>,
    location: Option<&str>,
    token: Option<&str>,
) -> Result<()> {
    api.post_unit("/attendance/check-in", &CheckInBody { time, location }, token)
        .await
}

pub async fn check_out(api: &ApiClient, time: DateTime<Utc>, token: Option<&str>) -> Result<()> {
    api.post_unit("/attendance/check-out", &CheckOutBody { time }, token)
        .await
}

pub async fn history(api: &ApiClient, token: Option<&str>) -> Result<Vec<AttendanceLogEntry>> {
    api.get_json("/attendance/history", token).await
}
