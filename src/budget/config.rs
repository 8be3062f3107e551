//! Budget configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the campaign ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Effective hourly rate a campaign must beat to be considered healthy.
    /// Exactly this rate still counts as a warning.
    pub baseline_hourly: f64,

    /// Estimated revenue per booked call (average of a $50-$100 upsell).
    pub upsell_value: f64,

    /// Human minutes charged when a campaign starts (setup overhead).
    pub setup_minutes: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            baseline_hourly: 7.0,
            upsell_value: 75.0,
            setup_minutes: 5.0,
        }
    }
}

impl BudgetConfig {
    /// Create a new budget config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the baseline hourly rate.
    pub fn with_baseline_hourly(mut self, rate: f64) -> Self {
        self.baseline_hourly = rate;
        self
    }

    /// Set the revenue credited per conversion.
    pub fn with_upsell_value(mut self, value: f64) -> Self {
        self.upsell_value = value.max(0.0);
        self
    }

    /// Check that every amount is finite and non-negative.
    ///
    /// Returns the offending key on failure.
    pub fn validate(&self) -> Result<(), (&'static str, f64)> {
        [
            ("baseline_hourly", self.baseline_hourly),
            ("upsell_value", self.upsell_value),
            ("setup_minutes", self.setup_minutes),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map_or(Ok(()), Err)
    }

    /// Set the setup overhead in minutes.
    pub fn with_setup_minutes(mut self, minutes: f64) -> Self {
        self.setup_minutes = minutes.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BudgetConfig::default();
        assert_eq!(config.baseline_hourly, 7.0);
        assert_eq!(config.upsell_value, 75.0);
        assert_eq!(config.setup_minutes, 5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BudgetConfig::new()
            .with_baseline_hourly(12.5)
            .with_upsell_value(100.0)
            .with_setup_minutes(10.0);

        assert_eq!(config.baseline_hourly, 12.5);
        assert_eq!(config.upsell_value, 100.0);
        assert_eq!(config.setup_minutes, 10.0);
    }

    #[test]
    fn test_validate() {
        assert!(BudgetConfig::default().validate().is_ok());

        let mut config = BudgetConfig::default();
        config.upsell_value = -75.0;
        assert_eq!(config.validate(), Err(("upsell_value", -75.0)));

        config.upsell_value = 75.0;
        config.setup_minutes = f64::INFINITY;
        assert_eq!(config.validate().unwrap_err().0, "setup_minutes");
    }

    #[test]
    fn test_builder_clamps_negative_values() {
        let config = BudgetConfig::new()
            .with_upsell_value(-5.0)
            .with_setup_minutes(-1.0);

        assert_eq!(config.upsell_value, 0.0);
        assert_eq!(config.setup_minutes, 0.0);
    }
}
