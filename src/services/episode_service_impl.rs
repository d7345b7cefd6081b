//! Store-backed implementation of the `EpisodeService` trait.

use std::sync::Arc;
use tracing::{debug, info};

use crate::db::EpisodeStore;
use crate::domain::EpisodeId;
use crate::models::{Episode, PageResult};
use crate::services::episode_service::{EpisodeError, EpisodeService};
use crate::services::query::{EpisodeQuery, run_query};

pub struct StoreEpisodeService {
    store: Arc<dyn EpisodeStore>,
}

impl StoreEpisodeService {
    #[must_use]
    pub fn new(store: Arc<dyn EpisodeStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl EpisodeService for StoreEpisodeService {
    async fn list_episodes(&self, query: &EpisodeQuery) -> Result<PageResult, EpisodeError> {
        let episodes = self.store.values().await;
        let result = run_query(episodes, query);

        debug!(
            sort_by = %query.sort_by,
            order = %query.order,
            watched = %query.watched,
            page = query.page,
            page_size = query.page_size,
            total = result.total,
            returned = result.data.len(),
            "Listed episodes"
        );

        Ok(result)
    }

    async fn get_episode(&self, id: &EpisodeId) -> Result<Episode, EpisodeError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| EpisodeError::NotFound(id.clone()))
    }

    async fn set_watched(&self, id: &EpisodeId, watched: bool) -> Result<Episode, EpisodeError> {
        let current = self.get_episode(id).await?;
        let updated = current.with_watched(watched);

        self.store.set(id.clone(), updated.clone()).await;

        info!(episode_id = %id, watched, "Updated watched state");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::domain::{SortField, SortOrder, WatchedFilter};
    use chrono::{TimeZone, Utc};

    fn episode(id: &str, year: i32, watched: bool) -> Episode {
        Episode {
            id: EpisodeId::new(id),
            series_id: "show".to_string(),
            series_title: "Show".to_string(),
            season: 1,
            episode: 1,
            title: format!("Episode {id}"),
            description: String::new(),
            duration_seconds: 1_800,
            air_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            watched,
        }
    }

    fn service() -> StoreEpisodeService {
        let store = Store::with_episodes([episode("A", 2020, false), episode("B", 2021, true)]);
        StoreEpisodeService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn unwatched_filter_returns_only_a() {
        let query = EpisodeQuery {
            watched: WatchedFilter::Unwatched,
            ..EpisodeQuery::default()
        };
        let result = service().list_episodes(&query).await.unwrap();

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id.as_str(), "A");
        assert_eq!(result.total, 1);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn newest_first_single_item_page() {
        let query = EpisodeQuery {
            sort_by: SortField::AirDate,
            order: SortOrder::Descending,
            ..EpisodeQuery::default()
        }
        .with_page_size(1);
        let result = service().list_episodes(&query).await.unwrap();

        assert_eq!(result.data[0].id.as_str(), "B");
        assert_eq!(result.total, 2);
        assert!(result.has_more);
    }

    #[tokio::test]
    async fn set_watched_replaces_only_the_flag() {
        let svc = service();
        let id = EpisodeId::new("A");
        let before = svc.get_episode(&id).await.unwrap();

        let updated = svc.set_watched(&id, true).await.unwrap();
        assert!(updated.watched);
        assert_eq!(updated.with_watched(false), before);
        assert_eq!(svc.get_episode(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn toggling_twice_restores_original() {
        let svc = service();
        let id = EpisodeId::new("B");
        let original = svc.get_episode(&id).await.unwrap();

        svc.set_watched(&id, !original.watched).await.unwrap();
        let restored = svc.set_watched(&id, original.watched).await.unwrap();
        assert_eq!(restored, original);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = service();
        let err = svc
            .set_watched(&EpisodeId::new("Z"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, EpisodeError::NotFound(id) if id.as_str() == "Z"));
        assert_eq!(
            svc.list_episodes(&EpisodeQuery::default()).await.unwrap().total,
            2
        );
    }
}
