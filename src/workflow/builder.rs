//! Generation job construction.
//!
//! A workflow is a ComfyUI-style node graph keyed by node id. Only the
//! parameters that differ per persona are modelled; the graph is handed to the
//! generation collaborator as an opaque description.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::overlay::AdOverlay;
use super::persona::Persona;
use crate::policy::PlatformConstraints;

const SAMPLER_STEPS: u32 = 20;
const STANDARD_COST: f64 = 0.01;
const FLUX_COST: f64 = 0.04;

/// Model choices for a persona.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonaProfile {
    /// Base checkpoint identifier
    pub base_model: &'static str,
    /// Style adapter (LoRA) identifier, `"none"` when unused
    pub lora: &'static str,
    /// Classifier-free guidance scale
    pub cfg: f64,
    /// Estimated cost of one generation
    pub estimated_cost: f64,
}

impl PersonaProfile {
    pub fn for_persona(persona: Persona) -> Self {
        match persona {
            Persona::Ruby => Self {
                base_model: "sdxl_base_v1.0.safetensors",
                lora: "zen_minimalist_v2.safetensors",
                cfg: 6.0,
                estimated_cost: STANDARD_COST,
            },
            // Flux wants a low cfg and is the expensive engine.
            Persona::Streamer => Self {
                base_model: "flux_dev_fp8.safetensors",
                lora: "flux_realism_lora.safetensors",
                cfg: 3.5,
                estimated_cost: FLUX_COST,
            },
            Persona::ContentManager => Self {
                base_model: "sdxl_turbo.safetensors",
                lora: "none",
                cfg: 1.5,
                estimated_cost: STANDARD_COST,
            },
        }
    }
}

/// One node of the generation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub class_type: String,
    pub inputs: Value,
}

impl WorkflowNode {
    fn new(class_type: &str, inputs: Value) -> Self {
        Self {
            class_type: class_type.to_string(),
            inputs,
        }
    }
}

/// Metadata describing what a workflow will cost and which engine runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub estimated_cost: f64,
    pub engine: String,
}

/// Generation job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub node_graph: BTreeMap<String, WorkflowNode>,
    pub metadata: WorkflowMetadata,
}

/// Builds generation jobs and overlays. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualEngineer;

impl VisualEngineer {
    pub fn new() -> Self {
        Self
    }

    /// Build the generation graph for a persona and prompt.
    pub fn construct_workflow(&self, persona: Persona, prompt: &str) -> Workflow {
        let profile = PersonaProfile::for_persona(persona);

        let mut node_graph = BTreeMap::new();
        node_graph.insert(
            "3".to_string(),
            WorkflowNode::new(
                "KSampler",
                json!({ "cfg": profile.cfg, "steps": SAMPLER_STEPS, "model": [profile.base_model] }),
            ),
        );
        node_graph.insert(
            "6".to_string(),
            WorkflowNode::new("CLIPTextEncode", json!({ "text": prompt })),
        );
        node_graph.insert(
            "10".to_string(),
            WorkflowNode::new("LoRALoader", json!({ "lora_name": profile.lora })),
        );

        Workflow {
            node_graph,
            metadata: WorkflowMetadata {
                estimated_cost: profile.estimated_cost,
                engine: profile.base_model.to_string(),
            },
        }
    }

    /// Describe a text overlay placed inside the platform's safe zones.
    pub fn generate_ad_overlay(&self, constraints: &PlatformConstraints, copy: &str) -> AdOverlay {
        AdOverlay::new(copy, constraints.safe_zones.clone())
    }
}
