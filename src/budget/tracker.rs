//! Campaign ledger and profitability health.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use super::config::BudgetConfig;

/// Kind of spend recorded against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostKind {
    /// Language/model API spend
    Model,
    /// GPU generation spend
    Gpu,
}

/// Profitability classification of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Effective hourly rate above the baseline
    Healthy,
    /// At or below the baseline
    Warning,
}

impl HealthStatus {
    /// Check if the ledger is above baseline.
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Stable label used in reports and tool responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Warning => "WARNING",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running financial aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    /// Human time spent, in hours
    pub human_hours: f64,
    /// Model spend
    pub model_cost: f64,
    /// GPU spend
    pub gpu_cost: f64,
    /// Number of booked calls
    pub booked_calls: u32,
    /// Estimated revenue from booked calls
    pub revenue_est: f64,
    /// (revenue - costs) / hours, recomputed on every mutation
    pub effective_hourly_rate: f64,
}

impl FinancialMetrics {
    /// Total spend across model and GPU.
    pub fn total_cost(&self) -> f64 {
        self.model_cost + self.gpu_cost
    }

    /// Revenue minus spend.
    pub fn profit(&self) -> f64 {
        self.revenue_est - self.total_cost()
    }

    /// Hourly rate derived from the current accumulators.
    ///
    /// With no human time logged yet the profit is divided by one hour, which
    /// understates the rate early on.
    pub fn derived_hourly_rate(&self) -> f64 {
        let hours = if self.human_hours > 0.0 {
            self.human_hours
        } else {
            1.0
        };
        self.profit() / hours
    }
}

/// Snapshot of the ledger with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub metrics: FinancialMetrics,
    pub status: HealthStatus,
    pub recommendation: String,
}

impl HealthReport {
    /// Format as a human-readable string.
    pub fn format(&self) -> String {
        let mut output = String::from("## CFO Report\n\n");

        output.push_str(&format!("**Status**: {}\n", self.status));
        output.push_str(&format!(
            "**Effective Hourly**: ${:.2}/hr\n",
            self.metrics.effective_hourly_rate
        ));
        output.push_str(&format!(
            "**Cost**: ${:.2} ({:.2} model, {:.2} gpu)\n",
            self.metrics.total_cost(),
            self.metrics.model_cost,
            self.metrics.gpu_cost
        ));
        output.push_str(&format!(
            "**Revenue**: ${:.2} from {} booked call(s)\n",
            self.metrics.revenue_est, self.metrics.booked_calls
        ));
        output.push_str(&format!(
            "**Human Hours**: {:.2}\n",
            self.metrics.human_hours
        ));
        output.push_str(&format!("**Recommendation**: {}\n", self.recommendation));

        output
    }
}

const SCALE_RECOMMENDATION: &str = "Scale current winning variant.";
const DEGRADE_RECOMMENDATION: &str =
    "Degrade model tier to DeepSeek-Lite or reduce generation variants.";

/// Accounting ledger for campaign spend and revenue.
///
/// This is a ledger, not a validating gateway: inputs are never rejected.
/// Negative or non-finite amounts are clamped to zero so the accumulators
/// stay non-decreasing.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    config: BudgetConfig,
    metrics: FinancialMetrics,
}

impl BudgetTracker {
    /// Create a new tracker with zeroed metrics.
    pub fn new(mut config: BudgetConfig) -> Self {
        config.upsell_value = sanitize("upsell value", config.upsell_value);
        config.setup_minutes = sanitize("setup minutes", config.setup_minutes);
        Self {
            config,
            metrics: FinancialMetrics::default(),
        }
    }

    /// Record spend of the given kind.
    pub fn record_cost(&mut self, kind: CostKind, amount: f64) {
        let amount = sanitize("cost", amount);
        match kind {
            CostKind::Model => self.metrics.model_cost += amount,
            CostKind::Gpu => self.metrics.gpu_cost += amount,
        }
        self.recalculate();
    }

    /// Record human time in minutes.
    pub fn record_human_time(&mut self, minutes: f64) {
        let minutes = sanitize("human time", minutes);
        self.metrics.human_hours += minutes / 60.0;
        self.recalculate();
    }

    /// Record a booked call and credit its estimated revenue.
    pub fn record_conversion(&mut self) {
        self.metrics.booked_calls = self.metrics.booked_calls.saturating_add(1);
        self.metrics.revenue_est += self.config.upsell_value;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.metrics.effective_hourly_rate = self.metrics.derived_hourly_rate();
    }

    /// Classify the current metrics against the baseline.
    pub fn status(&self) -> HealthStatus {
        if self.metrics.effective_hourly_rate > self.config.baseline_hourly {
            HealthStatus::Healthy
        } else {
            HealthStatus::Warning
        }
    }

    /// Snapshot the ledger with its status and recommendation.
    pub fn health_report(&self) -> HealthReport {
        let status = self.status();
        let recommendation = if status.is_healthy() {
            SCALE_RECOMMENDATION
        } else {
            DEGRADE_RECOMMENDATION
        };
        HealthReport {
            metrics: self.metrics.clone(),
            status,
            recommendation: recommendation.to_string(),
        }
    }

    /// Get the current metrics.
    pub fn metrics(&self) -> &FinancialMetrics {
        &self.metrics
    }

    /// Get the configuration.
    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }
}

fn sanitize(what: &str, amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        tracing::warn!(amount, "Ignoring invalid {} sample, recording 0", what);
        0.0
    }
}

/// Thread-safe budget tracker.
#[derive(Debug, Clone)]
pub struct SharedBudgetTracker {
    inner: Arc<RwLock<BudgetTracker>>,
}

impl SharedBudgetTracker {
    /// Create a new shared tracker.
    pub fn new(config: BudgetConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BudgetTracker::new(config))),
        }
    }

    /// Record spend of the given kind.
    pub fn record_cost(&self, kind: CostKind, amount: f64) {
        self.write().record_cost(kind, amount);
    }

    /// Record human time in minutes.
    pub fn record_human_time(&self, minutes: f64) {
        self.write().record_human_time(minutes);
    }

    /// Record a booked call.
    pub fn record_conversion(&self) {
        self.write().record_conversion();
    }

    /// Snapshot the ledger.
    pub fn health_report(&self) -> HealthReport {
        match self.inner.read() {
            Ok(tracker) => tracker.health_report(),
            Err(poisoned) => poisoned.into_inner().health_report(),
        }
    }

    /// Get a copy of the current metrics.
    pub fn metrics(&self) -> FinancialMetrics {
        self.health_report().metrics
    }

    fn write(&self) -> RwLockWriteGuard<'_, BudgetTracker> {
        match self.inner.write() {
            Ok(tracker) => tracker,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Get a copy of the configuration.
    pub fn config(&self) -> BudgetConfig {
        match self.inner.read() {
            Ok(tracker) => tracker.config().clone(),
            Err(poisoned) => poisoned.into_inner().config().clone(),
        }
    }
}

impl Default for SharedBudgetTracker {
    fn default() -> Self {
        Self::new(BudgetConfig::default())
    }
}
