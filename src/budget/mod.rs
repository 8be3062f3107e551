//! Campaign budget tracking for Genesis.
//!
//! This module keeps the running financial ledger of the assistant: human
//! time spent, model and GPU spend, booked calls and the revenue they bring.
//! From those it derives an effective hourly rate and a health classification
//! that the orchestrator consults before generating assets.
//!
//! # Overview
//!
//! - **BudgetConfig**: Baseline hourly rate, per-conversion revenue and setup overhead
//! - **BudgetTracker**: Accumulates samples and recomputes the hourly rate
//! - **SharedBudgetTracker**: Thread-safe handle shared by the orchestrator, command surface and tool server
//! - **HealthReport**: Snapshot of metrics with a status and recommendation
//!
//! # Example
//!
//! ```ignore
//! use genesis::budget::{BudgetConfig, BudgetTracker, CostKind};
//!
//! let mut tracker = BudgetTracker::new(BudgetConfig::default());
//!
//! tracker.record_human_time(5.0);
//! tracker.record_cost(CostKind::Gpu, 0.01);
//! tracker.record_conversion();
//!
//! let report = tracker.health_report();
//! assert!(report.status.is_healthy());
//! ```

mod config;
mod tracker;

pub use self::config::BudgetConfig;
pub use tracker::{
    BudgetTracker, CostKind, FinancialMetrics, HealthReport, HealthStatus, SharedBudgetTracker,
};
