//! Local watched overrides.
//!
//! The override map is the client's source of truth for `watched`: every list
//! it shows, remote or offline, is masked with it before display. The map is
//! persisted whole under a single well-known key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::OverrideStoreError;
use crate::config::ClientConfig;
use crate::constants::{APP_NAME, client::WATCHED_OVERRIDES_KEY};
use crate::domain::EpisodeId;
use crate::models::Episode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchedOverrides(HashMap<EpisodeId, bool>);

impl WatchedOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &EpisodeId) -> Option<bool> {
        self.0.get(id).copied()
    }

    pub fn set(&mut self, id: EpisodeId, watched: bool) {
        self.0.insert(id, watched);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn apply(&self, source: Vec<Episode>) -> Vec<Episode> {
        reconcile(source, self)
    }
}

/// Masks each episode's `watched` with its override, if any. Order and every
/// other field are left untouched.
#[must_use]
pub fn reconcile(source: Vec<Episode>, overrides: &WatchedOverrides) -> Vec<Episode> {
    if overrides.is_empty() {
        return source;
    }

    source
        .into_iter()
        .map(|mut episode| {
            if let Some(watched) = overrides.get(&episode.id) {
                episode.watched = watched;
            }
            episode
        })
        .collect()
}

#[async_trait]
pub trait OverrideStore: Send + Sync {
    async fn load(&self) -> Result<WatchedOverrides, OverrideStoreError>;

    /// Replaces the persisted map in full.
    async fn save(&self, overrides: &WatchedOverrides) -> Result<(), OverrideStoreError>;
}

/// Stores the override map as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileOverrideStore {
    path: PathBuf,
}

impl JsonFileOverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/episodic/watched_overrides_v1.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| {
            dir.join(APP_NAME)
                .join(format!("{WATCHED_OVERRIDES_KEY}.json"))
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, OverrideStoreError> {
        config
            .overrides_path
            .clone()
            .or_else(Self::default_path)
            .map(Self::new)
            .ok_or(OverrideStoreError::NoDataDir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OverrideStore for JsonFileOverrideStore {
    async fn load(&self) -> Result<WatchedOverrides, OverrideStoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No override file yet");
            return Ok(WatchedOverrides::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let overrides = serde_json::from_str(&content)?;
        Ok(overrides)
    }

    async fn save(&self, overrides: &WatchedOverrides) -> Result<(), OverrideStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string(overrides)?;
        tokio::fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), count = overrides.len(), "Saved overrides");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    fn temp_store() -> JsonFileOverrideStore {
        let dir = std::env::temp_dir().join(format!("episodic-overrides-{}", uuid::Uuid::new_v4()));
        JsonFileOverrideStore::new(dir.join("nested").join("overrides.json"))
    }

    #[test]
    fn reconcile_masks_only_overridden_ids() {
        let source = seed::bundled().unwrap();
        let first = source[0].id.clone();
        let second = source[1].id.clone();

        let mut overrides = WatchedOverrides::new();
        overrides.set(first.clone(), !source[0].watched);
        overrides.set(second.clone(), source[1].watched);
        overrides.set(EpisodeId::new("not-in-source"), true);

        let result = reconcile(source.clone(), &overrides);

        assert_eq!(result.len(), source.len());
        assert_eq!(result[0].watched, !source[0].watched);
        assert_eq!(result[1], source[1]);
        for (after, before) in result.iter().zip(&source).skip(2) {
            assert_eq!(after, before);
        }
    }

    #[test]
    fn reconcile_keeps_order_and_other_fields() {
        let source = seed::bundled().unwrap();
        let mut overrides = WatchedOverrides::new();
        for episode in &source {
            overrides.set(episode.id.clone(), true);
        }

        let result = overrides.apply(source.clone());
        for (after, before) in result.iter().zip(&source) {
            assert!(after.watched);
            assert_eq!(after, &before.with_watched(true));
        }
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut overrides = WatchedOverrides::new();
        overrides.set(EpisodeId::new("a"), true);

        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"a":true}"#);

        let parsed: WatchedOverrides = serde_json::from_str(r#"{"a":true,"b":false}"#).unwrap();
        assert_eq!(parsed.get(&EpisodeId::new("b")), Some(false));
        assert_eq!(parsed.get(&EpisodeId::new("c")), None);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let store = temp_store();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = temp_store();
        let mut overrides = WatchedOverrides::new();
        overrides.set(EpisodeId::new("harbor-lights-s01e03"), true);
        overrides.set(EpisodeId::new("harbor-lights-s01e01"), false);

        store.save(&overrides).await.unwrap();
        assert_eq!(store.load().await.unwrap(), overrides);

        overrides.set(EpisodeId::new("harbor-lights-s01e03"), false);
        store.save(&overrides).await.unwrap();
        assert_eq!(
            store.load().await.unwrap().get(&EpisodeId::new("harbor-lights-s01e03")),
            Some(false)
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(store.path(), "not json").await.unwrap();

        assert!(matches!(
            store.load().await,
            Err(OverrideStoreError::Json(_))
        ));
    }

    #[test]
    fn configured_path_wins() {
        let config = ClientConfig {
            overrides_path: Some(PathBuf::from("/tmp/custom.json")),
            ..ClientConfig::default()
        };
        let store = JsonFileOverrideStore::from_config(&config).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/custom.json"));
    }
}
