use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// In-memory attendance state. `CheckedIn` carries the check-in instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttendanceStatus {
    CheckedOut,
    CheckedIn { since: DateTime<Utc> },
}

/// Persisted shape of an open attendance session ({status, time}).
/// Written on check-in, removed on any form of check-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedAttendance {
    pub status: String,
    pub time: DateTime<Utc>,
}

pub const STATUS_CHECKED_IN: &str = "checked-in";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Display)]
pub enum Outcome {
    Present,
    Late,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Display)]
pub enum CheckMethod {
    #[serde(rename = "GPS")]
    #[strum(serialize = "GPS")]
    Gps,
    Manual,
    Auto,
}

/// One completed (or auto-closed) attendance cycle. Append-only,
/// newest first; times are kept as display strings the way the
/// backend history endpoint returns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceLogEntry {
    pub date: String,
    #[serde(rename = "in")]
    pub check_in: String,
    #[serde(rename = "out")]
    pub check_out: String,
    #[serde(rename = "status")]
    pub outcome: Outcome,
    pub method: CheckMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
