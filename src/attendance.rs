//! Check-in/check-out state machine with a startup auto-checkout sweep.
//!
//! The local state is authoritative: remote notifications are best-effort
//! and their failure never blocks a transition (same availability-first
//! policy as the session store). An open session left past the configured
//! threshold is closed by the sweep the next time the client starts, not
//! by a live timer.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, attendance as remote};
use crate::model::attendance::{
    AttendanceLogEntry, AttendanceStatus, CheckMethod, Outcome, PersistedAttendance,
    STATUS_CHECKED_IN,
};
use crate::store::{self, ATTENDANCE_KEY, KvStore};

pub const AUTO_CHECKOUT_NOTICE: &str = "You were auto-checked out due to timeout.";

pub struct AttendanceTracker {
    api: ApiClient,
    store: Box<dyn KvStore>,
    auto_checkout_after: Duration,
    status: AttendanceStatus,
    location: Option<String>,
    /// Locally completed cycles, newest first. Never edited or reordered.
    log: Vec<AttendanceLogEntry>,
}

impl AttendanceTracker {
    /// Restores any open session from the store. Call [`sweep`] afterwards
    /// to apply the auto-checkout policy to what was restored.
    pub fn new(api: ApiClient, store: Box<dyn KvStore>, auto_checkout_hours: i64) -> Self {
        let status = match store::get_value::<PersistedAttendance>(store.as_ref(), ATTENDANCE_KEY) {
            Some(saved) if saved.status == STATUS_CHECKED_IN => {
                debug!(since = %saved.time, "Restored open attendance session");
                AttendanceStatus::CheckedIn { since: saved.time }
            }
            _ => AttendanceStatus::CheckedOut,
        };
        Self {
            api,
            store,
            auto_checkout_after: Duration::hours(auto_checkout_hours),
            status,
            location: None,
            log: Vec::new(),
        }
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn log(&self) -> &[AttendanceLogEntry] {
        &self.log
    }

    /// One-shot startup evaluation of the auto-checkout policy. Returns the
    /// user-visible notice when a stale session was force-closed.
    pub fn sweep(&mut self) -> Option<String> {
        self.sweep_at(Utc::now())
    }

    /// [`sweep`] with an explicit clock.
    pub fn sweep_at(&mut self, now: DateTime<Utc>) -> Option<String> {
        let AttendanceStatus::CheckedIn { since } = self.status else {
            return None;
        };
        if now - since <= self.auto_checkout_after {
            return None;
        }

        info!(since = %since, "Auto-checkout: open session exceeded threshold");
        self.log.insert(
            0,
            AttendanceLogEntry {
                date: now.format("%Y-%m-%d").to_string(),
                check_in: format_time(since),
                check_out: "Auto-Checkout".to_string(),
                outcome: Outcome::Present,
                method: CheckMethod::Auto,
                location: None,
            },
        );
        self.store.remove(ATTENDANCE_KEY);
        self.status = AttendanceStatus::CheckedOut;
        self.location = None;
        Some(AUTO_CHECKOUT_NOTICE.to_string())
    }

    /// Transitions to `CheckedIn(now)` and persists it. The location is
    /// best-effort and may be absent; the remote notification is fired and
    /// forgotten.
    pub async fn check_in(&mut self, location: Option<String>, token: Option<&str>) {
        if let AttendanceStatus::CheckedIn { since } = self.status {
            debug!(since = %since, "Check-in ignored: already checked in");
            return;
        }

        let now = Utc::now();
        if let Err(e) = remote::check_in(&self.api, now, location.as_deref(), token).await {
            warn!(error = %e, "Remote check-in failed; recording locally only");
        }

        store::set_value(
            self.store.as_mut(),
            ATTENDANCE_KEY,
            &PersistedAttendance {
                status: STATUS_CHECKED_IN.to_string(),
                time: now,
            },
        );
        self.status = AttendanceStatus::CheckedIn { since: now };
        self.location = location;
        info!(at = %now, "Checked in");
    }

    /// Closes the open session: appends one Manual log entry, clears the
    /// persisted state and returns to `CheckedOut`. Returns the entry, or
    /// `None` when there was nothing to close.
    pub async fn check_out(&mut self, token: Option<&str>) -> Option<AttendanceLogEntry> {
        let AttendanceStatus::CheckedIn { since } = self.status else {
            debug!("Check-out ignored: not checked in");
            return None;
        };

        let now = Utc::now();
        if let Err(e) = remote::check_out(&self.api, now, token).await {
            warn!(error = %e, "Remote check-out failed; recording locally only");
        }

        let entry = AttendanceLogEntry {
            date: now.format("%Y-%m-%d").to_string(),
            check_in: format_time(since),
            check_out: format_time(now),
            outcome: Outcome::Present,
            method: CheckMethod::Manual,
            location: self.location.take(),
        };
        self.log.insert(0, entry.clone());
        self.store.remove(ATTENDANCE_KEY);
        self.status = AttendanceStatus::CheckedOut;
        info!(at = %now, "Checked out");
        Some(entry)
    }

    /// Attendance history: locally completed cycles first, then the
    /// backend's records, falling back to a fixed dataset offline.
    pub async fn history(&self, token: Option<&str>) -> Vec<AttendanceLogEntry> {
        let fetched = match remote::history(&self.api, token).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Using mock attendance history (backend unavailable)");
                fallback_history()
            }
        };
        let mut all = self.log.clone();
        all.extend(fetched);
        all
    }
}

fn format_time(t: DateTime<Utc>) -> String {
    t.format("%I:%M %p").to_string()
}

fn fallback_history() -> Vec<AttendanceLogEntry> {
    [
        ("2023-10-24", "08:55 AM", "05:05 PM", Outcome::Present),
        ("2023-10-23", "09:05 AM", "05:10 PM", Outcome::Late),
        ("2023-10-20", "08:50 AM", "04:55 PM", Outcome::Present),
    ]
    .into_iter()
    .map(|(date, check_in, check_out, outcome)| AttendanceLogEntry {
        date: date.to_string(),
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        outcome,
        method: CheckMethod::Gps,
        location: None,
    })
    .collect()
}
