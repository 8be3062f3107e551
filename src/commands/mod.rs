//! Chat command surface: the `/gen` slash command, run cards and the
//! buttons attached to them.
//!
//! A `/gen` invocation runs a booked-calls campaign through the orchestrator,
//! writes the copy pack under the run's artifact directory and stores a
//! [`RunCard`]. Button presses carry `gen:<action>:<run_id>[:<arg>]` ids and
//! are resolved against the stored card.

mod gen_command;
mod interaction;
mod render;
mod run_card;
mod store;

pub use gen_command::{gen_command, CommandChoice, CommandDefinition, CommandOption, GenOptions};
pub use interaction::{CommandService, CustomId, InteractionReply};
pub use render::{
    buttons_for_run, embed_for_run, ActionRow, Button, ButtonStyle, Embed, EmbedField, EmbedFooter,
    MessagePayload,
};
pub use run_card::{Artifact, CopyPack, OutputStyle, RunBudgetStatus, RunCard, GOAL_BOOKED_CALLS};
pub use store::{InMemoryRunCardStore, RunCardStore};
