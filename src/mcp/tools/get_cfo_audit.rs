// get_cfo_audit MCP tool implementation
// Reports the budget health of the running campaign; takes no parameters

use serde::{Deserialize, Serialize};

use crate::budget::{FinancialMetrics, SharedBudgetTracker};

/// Response from the get_cfo_audit tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetCfoAuditResponse {
    /// "healthy" or "warning"
    pub status: String,
    /// Effective hourly rate in dollars
    pub effective_hourly: f64,
    pub recommendation: String,
    pub metrics: FinancialMetrics,
}

pub fn handle(budget: &SharedBudgetTracker) -> GetCfoAuditResponse {
    let report = budget.health_report();
    GetCfoAuditResponse {
        status: report.status.as_str().to_ascii_lowercase(),
        effective_hourly: report.metrics.effective_hourly_rate,
        recommendation: report.recommendation,
        metrics: report.metrics,
    }
}
