use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline dashboard figures. The backend pre-formats these for display
/// ("94%", "$842k"), so they stay strings here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: String,
    pub attendance_rate: String,
    pub on_leave: String,
    pub payroll: String,
}

/// One weekday in the attendance trend chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub name: String,
    pub present: u32,
    pub late: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryMonth {
    pub month: String,
    pub net: i64,
    pub bonus: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub base: i64,
    pub hra: i64,
    pub allowance: i64,
    pub tax: i64,
    pub pf: i64,
    pub net: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}
