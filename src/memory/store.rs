use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::gate::{MemoryConfig, Rejection, WriteGate};

/// A stored memory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryItem {
    pub id: String,
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    pub content: String,
    pub score: f64,
}

/// In-process memory with a write-gate and lexical recall.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    gate: WriteGate,
    items: Arc<RwLock<Vec<MemoryItem>>>,
}

impl MemoryStore {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            gate: WriteGate::new(config),
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store preloaded with the baseline platform rules.
    pub fn seeded(config: MemoryConfig) -> Self {
        let store = Self::new(config);
        for (content, category) in [
            ("TikTok hook rule: Start with motion.", "hook"),
            ("Persona Ruby constraint: Never use emojis in headlines.", "persona"),
        ] {
            if let Err(reason) = store.write(content, category, None) {
                tracing::warn!(%reason, "Seed memory rejected");
            }
        }
        store
    }

    /// Store an item if the write-gate admits it.
    pub fn write(&self, content: &str, category: &str, evidence: Option<Value>) -> Result<MemoryItem, Rejection> {
        if let Err(reason) = self.gate.check(content, category, evidence.as_ref()) {
            tracing::debug!(category, %reason, "Memory write rejected");
            return Err(reason);
        }

        let item = MemoryItem {
            id: format!("mem_{}", Uuid::new_v4().simple()),
            content: content.trim().to_string(),
            category: category.to_string(),
            evidence,
            created_at: Utc::now(),
        };
        match self.items.write() {
            Ok(mut items) => items.push(item.clone()),
            Err(poisoned) => poisoned.into_inner().push(item.clone()),
        }
        tracing::info!(id = %item.id, category, "Memory stored");
        Ok(item)
    }

    /// Items ranked by the share of query tokens they contain.
    ///
    /// Hits scoring zero are dropped; ties go to the most recent item.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<MemoryHit> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let items = match self.items.read() {
            Ok(items) => items.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        // Newest first so the stable sort keeps recency order among ties.
        let mut hits: Vec<MemoryHit> = items
            .iter()
            .rev()
            .filter_map(|item| {
                let item_tokens = tokenize(&item.content);
                let overlap = query_tokens.intersection(&item_tokens).count();
                (overlap > 0).then(|| MemoryHit {
                    content: item.content.clone(),
                    score: overlap as f64 / query_tokens.len() as f64,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        hits
    }

    pub fn len(&self) -> usize {
        match self.items.read() {
            Ok(items) => items.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
