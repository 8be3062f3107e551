use serde::Serialize;

use super::run_card::OutputStyle;
use crate::error::GenesisResult;
use crate::policy::Platform;
use crate::workflow::Persona;

const OPTION_TYPE_STRING: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandChoice {
    pub name: String,
    pub value: String,
}

impl CommandChoice {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
    pub choices: Vec<CommandChoice>,
}

/// Slash command registration payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

/// The `/gen` command.
pub fn gen_command() -> CommandDefinition {
    let string_option = |name: &str, description: &str, required: bool, choices: Vec<CommandChoice>| {
        CommandOption {
            name: name.to_string(),
            description: description.to_string(),
            kind: OPTION_TYPE_STRING,
            required,
            choices,
        }
    };

    CommandDefinition {
        name: "gen".to_string(),
        description: "Generate a Genesis run card".to_string(),
        options: vec![
            string_option(
                "persona",
                "Persona",
                true,
                Persona::ALL
                    .iter()
                    .map(|p| CommandChoice::new(p.as_str(), p.as_str()))
                    .collect(),
            ),
            string_option(
                "platform",
                "Platform",
                true,
                [Platform::Instagram, Platform::TikTok, Platform::X, Platform::Facebook]
                    .iter()
                    .map(|p| CommandChoice::new(p.as_str(), p.as_str()))
                    .collect(),
            ),
            string_option(
                "style",
                "Research output style",
                false,
                vec![
                    CommandChoice::new("Wiki (citations)", "WIKI"),
                    CommandChoice::new("Narrative (clean)", "NARRATIVE"),
                ],
            ),
        ],
    }
}

/// Parsed `/gen` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenOptions {
    pub persona: Persona,
    pub platform: Platform,
    pub style: OutputStyle,
}

impl GenOptions {
    pub fn new(persona: Persona, platform: Platform) -> Self {
        Self {
            persona,
            platform,
            style: OutputStyle::default(),
        }
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Parse raw option values; a missing style means NARRATIVE.
    pub fn parse(persona: &str, platform: &str, style: Option<&str>) -> GenesisResult<Self> {
        let style = match style {
            Some(style) => style.parse()?,
            None => OutputStyle::default(),
        };
        Ok(Self {
            persona: persona.parse()?,
            platform: platform.parse()?,
            style,
        })
    }
}
