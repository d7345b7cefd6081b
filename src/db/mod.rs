//! In-memory episode storage.
//!
//! The store is the only source of truth on the server and lives for the
//! lifetime of the process. It is handed to request handlers through the
//! application state rather than held in a global.

pub mod seed;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::EpisodeId;
use crate::models::Episode;

/// Storage contract for episodes keyed by id.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    async fn get(&self, id: &EpisodeId) -> Option<Episode>;

    /// Inserts or fully replaces the record stored under `id`.
    async fn set(&self, id: EpisodeId, episode: Episode);

    /// All stored episodes, in insertion order.
    async fn values(&self) -> Vec<Episode>;
}

#[derive(Debug, Default)]
struct EpisodeTable {
    index: HashMap<EpisodeId, usize>,
    rows: Vec<Episode>,
}

impl EpisodeTable {
    fn upsert(&mut self, id: EpisodeId, episode: Episode) {
        if let Some(&slot) = self.index.get(&id) {
            self.rows[slot] = episode;
        } else {
            self.index.insert(id, self.rows.len());
            self.rows.push(episode);
        }
    }
}

#[derive(Clone, Default)]
pub struct Store {
    table: Arc<RwLock<EpisodeTable>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a list of episodes. A repeated id keeps the last record.
    #[must_use]
    pub fn with_episodes(episodes: impl IntoIterator<Item = Episode>) -> Self {
        let mut table = EpisodeTable::default();
        for episode in episodes {
            table.upsert(episode.id.clone(), episode);
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EpisodeStore for Store {
    async fn get(&self, id: &EpisodeId) -> Option<Episode> {
        let table = self.table.read().await;
        table.index.get(id).map(|&slot| table.rows[slot].clone())
    }

    async fn set(&self, id: EpisodeId, episode: Episode) {
        self.table.write().await.upsert(id, episode);
    }

    async fn values(&self) -> Vec<Episode> {
        self.table.read().await.rows.clone()
    }
}
