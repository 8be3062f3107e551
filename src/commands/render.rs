//! Chat message payloads for run cards: an embed plus two rows of buttons.

use serde::{Serialize, Serializer};
use std::path::PathBuf;

use super::run_card::RunCard;

const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;

const EMBED_TITLE: &str = "Genesis Run Card";
const EMBED_FOOTER: &str = "Midjourney-style controls: Variate / Upscale / Save / Rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
}

impl Serialize for ButtonStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: u8,
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl Button {
    fn new(custom_id: String, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            kind: COMPONENT_BUTTON,
            custom_id,
            label: label.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Button>,
}

impl ActionRow {
    fn new(components: Vec<Button>) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

/// A full chat message: embeds, button rows and files to attach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

impl MessagePayload {
    /// Card message without attachments.
    pub fn for_run(card: &RunCard) -> Self {
        Self {
            embeds: vec![embed_for_run(card)],
            components: buttons_for_run(card),
            files: Vec::new(),
        }
    }

    /// Card message attaching every artifact that exists on disk.
    pub fn with_artifacts(card: &RunCard) -> Self {
        let mut payload = Self::for_run(card);
        payload.files = card
            .artifacts
            .iter()
            .filter(|artifact| artifact.path.is_file())
            .map(|artifact| artifact.path.clone())
            .collect();
        payload
    }
}

pub fn embed_for_run(card: &RunCard) -> Embed {
    let mut fields = vec![
        EmbedField::inline("Run", card.run_id.clone()),
        EmbedField::inline("Persona", card.persona.as_str()),
        EmbedField::inline("Platform", card.platform.as_str()),
        EmbedField::inline("Goal", card.goal.clone()),
        EmbedField::inline("Budget", card.budget_status.as_str()),
        EmbedField::inline("Style", card.output_style.as_str()),
    ];
    if let Some(rating) = card.rating {
        fields.push(EmbedField::inline("Rating", format!("{rating}/5")));
    }
    if !card.artifacts.is_empty() {
        let labels: Vec<String> = card
            .artifacts
            .iter()
            .map(|artifact| format!("• {}", artifact.label))
            .collect();
        fields.push(EmbedField {
            name: "Artifacts".to_string(),
            value: labels.join("\n"),
            inline: false,
        });
    }

    Embed {
        title: EMBED_TITLE.to_string(),
        fields,
        footer: EmbedFooter {
            text: EMBED_FOOTER.to_string(),
        },
    }
}

pub fn buttons_for_run(card: &RunCard) -> Vec<ActionRow> {
    let id = |action: &str, arg: Option<&str>| match arg {
        Some(arg) => format!("gen:{}:{}:{}", action, card.run_id, arg),
        None => format!("gen:{}:{}", action, card.run_id),
    };

    vec![
        ActionRow::new(vec![
            Button::new(id("variate", Some("v1")), "V1 Variate", ButtonStyle::Secondary),
            Button::new(id("upscale", Some("u1")), "U1 Upscale", ButtonStyle::Secondary),
            Button::new(id("save", None), "Save Workflow", ButtonStyle::Success),
            Button::new(id("copypack", None), "Copy Pack", ButtonStyle::Primary),
        ]),
        ActionRow::new(vec![
            Button::new(id("rate", Some("5")), "Rate ⭐⭐⭐⭐⭐", ButtonStyle::Primary),
            Button::new(id("cost", None), "Report Cost", ButtonStyle::Secondary),
            Button::new(
                id("style", None),
                format!("Output: {}", card.output_style),
                ButtonStyle::Secondary,
            ),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::run_card::{Artifact, OutputStyle, RunBudgetStatus, GOAL_BOOKED_CALLS};
    use crate::policy::Platform;
    use crate::workflow::Persona;

    fn card() -> RunCard {
        RunCard {
            run_id: "abc".to_string(),
            persona: Persona::Streamer,
            platform: Platform::TikTok,
            goal: GOAL_BOOKED_CALLS.to_string(),
            budget_status: RunBudgetStatus::Warning,
            output_style: OutputStyle::Wiki,
            artifacts: Vec::new(),
            copy_pack: None,
            rating: None,
            workflow: None,
        }
    }

    #[test]
    fn test_embed_fields() {
        let embed = embed_for_run(&card());
        assert_eq!(embed.title, "Genesis Run Card");
        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Run", "Persona", "Platform", "Goal", "Budget", "Style"]);
        assert_eq!(embed.fields[4].value, "WARNING");
    }

    #[test]
    fn test_embed_lists_artifacts() {
        let mut card = card();
        card.artifacts.push(Artifact {
            label: "Copy Pack (txt)".to_string(),
            path: PathBuf::from("/nonexistent/copy_pack.txt"),
        });
        let embed = embed_for_run(&card);
        let last = embed.fields.last().unwrap();
        assert_eq!(last.name, "Artifacts");
        assert_eq!(last.value, "• Copy Pack (txt)");
        assert!(!last.inline);

        assert!(MessagePayload::with_artifacts(&card).files.is_empty());
    }

    #[test]
    fn test_button_rows() {
        let rows = buttons_for_run(&card());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].components.len(), 4);
        assert_eq!(rows[1].components.len(), 3);
        assert_eq!(rows[0].components[0].custom_id, "gen:variate:abc:v1");
        assert_eq!(rows[0].components[2].custom_id, "gen:save:abc");
        assert_eq!(rows[1].components[2].label, "Output: WIKI");
    }

    #[test]
    fn test_payload_json_shape() {
        let value = serde_json::to_value(MessagePayload::for_run(&card())).unwrap();
        assert_eq!(value["components"][0]["type"], 1);
        assert_eq!(value["components"][0]["components"][0]["type"], 2);
        assert_eq!(value["components"][0]["components"][2]["style"], 3);
        assert!(value.get("files").is_none());
    }
}
