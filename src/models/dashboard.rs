use serde::{Deserialize, Serialize};

/// Aggregate snapshot from `/admin/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub student_tickets_count: u64,
    pub student_tickets_value: f64,
    pub non_student_tickets_count: u64,
    pub non_student_tickets_value: f64,
    pub total_revenue: f64,
    pub total_tickets: u64,
    pub mobile_money_payments: u64,
    pub card_payments: u64,
    pub pending_student_applications: u64,
    pub total_student_applications: u64,
    pub rejected_student_applications: u64,
    pub paid_student_applications: u64,
}

/// "Gh 1234.50"
pub fn format_cedis(amount: f64) -> String {
    format!("Gh {:.2}", amount)
}
