use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::budget::HealthReport;
use crate::error::GenesisError;
use crate::policy::Platform;
use crate::workflow::{Persona, Workflow};

/// Goal every command-surface run optimizes for.
pub const GOAL_BOOKED_CALLS: &str = "BookedCalls";

/// Research output style shown on a run card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputStyle {
    Wiki,
    #[default]
    Narrative,
}

impl OutputStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Wiki => "WIKI",
            OutputStyle::Narrative => "NARRATIVE",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            OutputStyle::Wiki => OutputStyle::Narrative,
            OutputStyle::Narrative => OutputStyle::Wiki,
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputStyle {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WIKI" => Ok(OutputStyle::Wiki),
            "NARRATIVE" => Ok(OutputStyle::Narrative),
            _ => Err(GenesisError::InvalidOutputStyle(s.to_string())),
        }
    }
}

/// Budget light shown on a run card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunBudgetStatus {
    Ok,
    Warning,
    /// Costs exceed revenue
    Stop,
}

impl RunBudgetStatus {
    pub fn from_report(report: &HealthReport) -> Self {
        if report.metrics.effective_hourly_rate < 0.0 {
            RunBudgetStatus::Stop
        } else if report.status.is_healthy() {
            RunBudgetStatus::Ok
        } else {
            RunBudgetStatus::Warning
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunBudgetStatus::Ok => "OK",
            RunBudgetStatus::Warning => "WARNING",
            RunBudgetStatus::Stop => "STOP",
        }
    }
}

impl fmt::Display for RunBudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file produced for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub label: String,
    pub path: PathBuf,
}

/// Per-platform copy lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPack {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fb: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ig: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiktok: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_snippet: Option<String>,
}

impl CopyPack {
    /// Baseline lines for booked-call campaigns.
    pub fn booked_calls() -> Self {
        Self {
            x: vec!["Calm certainty. Outcomes are not optional.".to_string()],
            ig: vec!["Book your call. We align timing, clarity, probability.".to_string()],
            ..Self::default()
        }
    }

    /// Markdown sections for chat display; empty when nothing is set.
    pub fn sections(&self) -> Vec<String> {
        let mut sections = Vec::new();
        for (heading, lines) in [
            ("X", &self.x),
            ("FB", &self.fb),
            ("IG", &self.ig),
            ("TikTok", &self.tiktok),
        ] {
            if !lines.is_empty() {
                let bullets: Vec<String> = lines.iter().map(|line| format!("• {line}")).collect();
                sections.push(format!("**{}**\n{}", heading, bullets.join("\n")));
            }
        }
        if let Some(snippet) = &self.blog_snippet {
            sections.push(format!("**Blog snippet**\n{snippet}"));
        }
        sections
    }

    /// Plain-text artifact body.
    pub fn to_text(&self, persona: Persona, platform: Platform, style: OutputStyle) -> String {
        let mut lines = vec![
            format!("Persona: {persona}"),
            format!("Platform: {platform}"),
            format!("OutputStyle: {style}"),
        ];
        for (heading, copy) in [
            ("X", &self.x),
            ("FB", &self.fb),
            ("IG", &self.ig),
            ("TikTok", &self.tiktok),
        ] {
            if copy.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{heading}:"));
            lines.extend(copy.iter().map(|line| format!("- {line}")));
        }
        if let Some(snippet) = &self.blog_snippet {
            lines.push(String::new());
            lines.push("Blog:".to_string());
            lines.push(snippet.clone());
        }
        lines.join("\n")
    }
}

/// Summary of one `/gen` invocation, kept so buttons can act on it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCard {
    pub run_id: String,
    pub persona: Persona,
    pub platform: Platform,
    pub goal: String,
    pub budget_status: RunBudgetStatus,
    pub output_style: OutputStyle,
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_pack: Option<CopyPack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Workflow>,
}

impl RunCard {
    /// Attach an artifact, replacing any earlier one with the same label.
    pub fn attach(&mut self, artifact: Artifact) {
        self.artifacts.retain(|existing| existing.label != artifact.label);
        self.artifacts.push(artifact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetConfig, BudgetTracker, CostKind};

    #[test]
    fn test_output_style_parse_and_toggle() {
        assert_eq!("wiki".parse::<OutputStyle>().unwrap(), OutputStyle::Wiki);
        assert_eq!("NARRATIVE".parse::<OutputStyle>().unwrap(), OutputStyle::Narrative);
        assert!("essay".parse::<OutputStyle>().is_err());
        assert_eq!(OutputStyle::Wiki.toggled(), OutputStyle::Narrative);
        assert_eq!(OutputStyle::default(), OutputStyle::Narrative);
        assert_eq!(serde_json::to_value(OutputStyle::Wiki).unwrap(), "WIKI");
    }

    #[test]
    fn test_budget_status_from_report() {
        let mut tracker = BudgetTracker::new(BudgetConfig::default());
        assert_eq!(RunBudgetStatus::from_report(&tracker.health_report()), RunBudgetStatus::Warning);

        tracker.record_human_time(5.0);
        tracker.record_conversion();
        assert_eq!(RunBudgetStatus::from_report(&tracker.health_report()), RunBudgetStatus::Ok);

        let mut losing = BudgetTracker::new(BudgetConfig::default());
        losing.record_cost(CostKind::Model, 3.0);
        assert_eq!(RunBudgetStatus::from_report(&losing.health_report()), RunBudgetStatus::Stop);
    }

    #[test]
    fn test_copy_pack_sections() {
        let pack = CopyPack::booked_calls();
        let sections = pack.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], "**X**\n• Calm certainty. Outcomes are not optional.");
        assert!(CopyPack::default().sections().is_empty());
    }

    #[test]
    fn test_copy_pack_text() {
        let text = CopyPack::booked_calls().to_text(Persona::Ruby, Platform::TikTok, OutputStyle::Narrative);
        assert_eq!(
            text,
            "Persona: Ruby\nPlatform: TikTok\nOutputStyle: NARRATIVE\n\nX:\n- Calm certainty. Outcomes are not optional.\n\nIG:\n- Book your call. We align timing, clarity, probability."
        );
    }
}
