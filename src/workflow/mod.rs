//! Creative workflow builder: maps personas to generation jobs.

mod builder;
mod overlay;
mod persona;

pub use builder::{PersonaProfile, VisualEngineer, Workflow, WorkflowMetadata, WorkflowNode};
pub use overlay::AdOverlay;
pub use persona::Persona;
