//! Platform culture lookup tables.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::platform::Platform;

/// Percentage margin of one edge of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub u8);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .trim_end_matches('%')
            .parse::<u8>()
            .map(Percent)
            .map_err(|_| de::Error::custom(format!("invalid percentage: {raw}")))
    }
}

/// Per-edge margins where overlay content must not be placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeZones {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Percent>,
}

impl SafeZones {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// Compact JSON rendering, e.g. `{"top":"15%","bottom":"20%"}`.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Layout and tone constraints for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConstraints {
    /// Aspect ratio guidance
    pub format: String,
    pub pacing: String,
    pub safe_zones: SafeZones,
    pub tone: String,
}

impl PlatformConstraints {
    fn new(format: &str, pacing: &str, safe_zones: SafeZones, tone: &str) -> Self {
        Self {
            format: format.to_string(),
            pacing: pacing.to_string(),
            safe_zones,
            tone: tone.to_string(),
        }
    }

    /// Constraints used when a platform has no dedicated policy.
    pub fn neutral() -> Self {
        Self::new("1:1", "Standard", SafeZones::default(), "Neutral")
    }
}

const US_MARKET_POST_WINDOW: &str = "10:00 AM - 1:00 PM EST";

/// Stateless platform culture expert.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformPolicy;

impl PlatformPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Constraints for a platform. Total: platforms without a policy get
    /// [`PlatformConstraints::neutral`].
    pub fn constraints(&self, platform: Platform) -> PlatformConstraints {
        match platform {
            Platform::TikTok => PlatformConstraints::new(
                "9:16",
                "Fast cuts, hook within 1.5s",
                SafeZones {
                    top: Some(Percent(15)),
                    bottom: Some(Percent(20)),
                    right: Some(Percent(15)),
                    ..SafeZones::default()
                },
                "Native slang, unpolished, high energy",
            ),
            Platform::Instagram => PlatformConstraints::new(
                "4:5 or 9:16",
                "Aesthetic driven, loopable",
                SafeZones {
                    top: Some(Percent(0)),
                    bottom: Some(Percent(0)),
                    ..SafeZones::default()
                },
                "Polished, aspirational, clear CTA",
            ),
            Platform::X => PlatformConstraints::new(
                "16:9 or 1:1",
                "Static or short loops",
                SafeZones {
                    top: Some(Percent(0)),
                    bottom: Some(Percent(0)),
                    ..SafeZones::default()
                },
                "Punchy, controversial, thread-starter",
            ),
            Platform::Facebook => PlatformConstraints::neutral(),
        }
    }

    /// Constraints by raw platform name; unknown names get the neutral default.
    pub fn constraints_for_name(&self, name: &str) -> PlatformConstraints {
        match name.parse::<Platform>() {
            Ok(platform) => self.constraints(platform),
            Err(_) => {
                tracing::debug!(platform = name, "No policy for platform, using neutral");
                PlatformConstraints::neutral()
            }
        }
    }

    /// Recommended posting window. Only the US market is modelled, so every
    /// timezone gets the same window.
    pub fn post_window(&self, _timezone: &str) -> &'static str {
        US_MARKET_POST_WINDOW
    }
}
