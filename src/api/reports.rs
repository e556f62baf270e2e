//! Read-only dashboard, salary and audit views: fetch from the backend,
//! fall back to fixed datasets when it is unreachable. No computation
//! happens here beyond handing data to the caller.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ApiClient;
use crate::model::reports::{AuditLog, DashboardStats, SalaryBreakdown, SalaryMonth, TrendPoint};

pub async fn dashboard_stats(api: &ApiClient, token: Option<&str>) -> DashboardStats {
    match api.get_json("/dashboard/stats", token).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!(error = %e, "Using mock dashboard stats (backend unavailable)");
            DashboardStats {
                total_employees: "142".to_string(),
                attendance_rate: "94%".to_string(),
                on_leave: "8".to_string(),
                payroll: "$842k".to_string(),
            }
        }
    }
}

pub async fn attendance_trends(api: &ApiClient, token: Option<&str>) -> Vec<TrendPoint> {
    match api.get_json("/dashboard/attendance-trends", token).await {
        Ok(trends) => trends,
        Err(e) => {
            warn!(error = %e, "Using mock attendance trends (backend unavailable)");
            [
                ("Mon", 40, 2),
                ("Tue", 42, 1),
                ("Wed", 38, 5),
                ("Thu", 41, 2),
                ("Fri", 39, 4),
            ]
            .into_iter()
            .map(|(name, present, late)| TrendPoint {
                name: name.to_string(),
                present,
                late,
            })
            .collect()
        }
    }
}

/// Stats and trends together, fetched concurrently the way the dashboard
/// view loads them.
pub async fn dashboard(api: &ApiClient, token: Option<&str>) -> (DashboardStats, Vec<TrendPoint>) {
    futures::join!(dashboard_stats(api, token), attendance_trends(api, token))
}

pub async fn salary_history(api: &ApiClient, token: Option<&str>) -> Vec<SalaryMonth> {
    match api.get_json("/salary/history", token).await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Using mock salary history (backend unavailable)");
            [
                ("Jan", 4000, 200),
                ("Feb", 4000, 0),
                ("Mar", 4100, 500),
                ("Apr", 4100, 0),
                ("May", 4100, 0),
                ("Jun", 4200, 1000),
            ]
            .into_iter()
            .map(|(month, net, bonus)| SalaryMonth {
                month: month.to_string(),
                net,
                bonus,
            })
            .collect()
        }
    }
}

pub async fn salary_breakdown(api: &ApiClient, token: Option<&str>) -> SalaryBreakdown {
    match api.get_json("/salary/breakdown", token).await {
        Ok(breakdown) => breakdown,
        Err(e) => {
            warn!(error = %e, "Using mock salary breakdown (backend unavailable)");
            SalaryBreakdown {
                base: 3500,
                hra: 1200,
                allowance: 800,
                tax: 450,
                pf: 200,
                net: 4850,
            }
        }
    }
}

pub async fn salary(api: &ApiClient, token: Option<&str>) -> (Vec<SalaryMonth>, SalaryBreakdown) {
    futures::join!(salary_history(api, token), salary_breakdown(api, token))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

pub async fn audit_logs(api: &ApiClient, filter: &AuditFilter, token: Option<&str>) -> Vec<AuditLog> {
    match api.get_json_query("/audit-logs", filter, token).await {
        Ok(logs) => logs,
        Err(e) => {
            warn!(error = %e, "Using mock audit logs (backend unavailable)");
            let now = Utc::now();
            (0..10)
                .map(|i| AuditLog {
                    id: format!("LOG-{}", 1000 + i),
                    user_id: if i % 2 == 0 { "1" } else { "2" }.to_string(),
                    user_name: if i % 2 == 0 { "Admin User" } else { "John Doe" }.to_string(),
                    action: if i % 2 == 0 { "Approved Leave" } else { "Checked In" }.to_string(),
                    timestamp: now - Duration::hours(i),
                    details: format!("ip=192.168.1.{}", 10 + i),
                })
                .collect()
        }
    }
}
