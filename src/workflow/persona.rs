use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenesisError;

/// Named content-generation style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Persona {
    #[default]
    Ruby,
    Streamer,
    ContentManager,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Ruby, Persona::Streamer, Persona::ContentManager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Ruby => "Ruby",
            Persona::Streamer => "Streamer",
            Persona::ContentManager => "ContentManager",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Persona {
    type Error = GenesisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Persona {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ruby" => Ok(Persona::Ruby),
            "streamer" => Ok(Persona::Streamer),
            "contentmanager" | "content_manager" | "content-manager" => {
                Ok(Persona::ContentManager)
            }
            _ => Err(GenesisError::InvalidPersona(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persona() {
        assert_eq!("Ruby".parse::<Persona>().unwrap(), Persona::Ruby);
        assert_eq!("content_manager".parse::<Persona>().unwrap(), Persona::ContentManager);
        assert!(matches!(
            "Narrator".parse::<Persona>(),
            Err(GenesisError::InvalidPersona(_))
        ));
    }

    #[test]
    fn test_default_persona_is_ruby() {
        assert_eq!(Persona::default(), Persona::Ruby);
    }

    #[test]
    fn test_deserialize_accepts_aliases() {
        let persona: Persona = serde_json::from_str("\"streamer\"").unwrap();
        assert_eq!(persona, Persona::Streamer);
        let persona: Persona = serde_json::from_str("\"content-manager\"").unwrap();
        assert_eq!(persona, Persona::ContentManager);
        assert!(serde_json::from_str::<Persona>("\"Narrator\"").is_err());
        assert_eq!(serde_json::to_value(Persona::ContentManager).unwrap(), "ContentManager");
    }
}
