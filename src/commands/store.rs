use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::run_card::RunCard;
use crate::error::GenesisResult;

/// Persistence for run cards.
#[async_trait]
pub trait RunCardStore: Send + Sync {
    /// Insert or replace a card keyed by its run id.
    async fn put(&self, card: RunCard) -> GenesisResult<()>;

    async fn get(&self, run_id: &str) -> GenesisResult<Option<RunCard>>;
}

/// Process-local store; cards are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryRunCardStore {
    cards: RwLock<HashMap<String, RunCard>>,
}

impl InMemoryRunCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }
}

#[async_trait]
impl RunCardStore for InMemoryRunCardStore {
    async fn put(&self, card: RunCard) -> GenesisResult<()> {
        self.cards.write().await.insert(card.run_id.clone(), card);
        Ok(())
    }

    async fn get(&self, run_id: &str) -> GenesisResult<Option<RunCard>> {
        Ok(self.cards.read().await.get(run_id).cloned())
    }
}
