use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenesisError;

/// Social platform a campaign targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
    TikTok,
    Instagram,
    X,
    /// Accepted by the command surface; has no dedicated policy.
    Facebook,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::X,
        Platform::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::X => "X",
            Platform::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Platform {
    type Error = GenesisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Platform {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Ok(Platform::TikTok),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "x" | "twitter" => Ok(Platform::X),
            "facebook" | "fb" => Ok(Platform::Facebook),
            _ => Err(GenesisError::InvalidPlatform(s.to_string())),
        }
    }
}
