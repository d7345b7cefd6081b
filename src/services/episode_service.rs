//! Domain service for episode listing and watched-state changes.
//!
//! This module provides the [`EpisodeService`] trait. Handlers talk to the
//! trait, never to the store directly.

use crate::domain::EpisodeId;
use crate::models::{Episode, PageResult};
use crate::services::query::EpisodeQuery;
use thiserror::Error;

/// Domain errors for episode operations.
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Episode {0} not found")]
    NotFound(EpisodeId),
}

#[async_trait::async_trait]
pub trait EpisodeService: Send + Sync {
    /// Runs a validated query over the whole catalog.
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<PageResult, EpisodeError>;

    /// Gets a single episode.
    ///
    /// # Errors
    ///
    /// - Returns [`EpisodeError::NotFound`] if the id is unknown
    async fn get_episode(&self, id: &EpisodeId) -> Result<Episode, EpisodeError>;

    /// Replaces the stored record with `watched` updated and returns it.
    ///
    /// # Errors
    ///
    /// - Returns [`EpisodeError::NotFound`] if the id is unknown; nothing is written
    async fn set_watched(&self, id: &EpisodeId, watched: bool) -> Result<Episode, EpisodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_error_display() {
        let err = EpisodeError::NotFound(EpisodeId::new("Z"));
        assert_eq!(err.to_string(), "Episode Z not found");
    }
}
