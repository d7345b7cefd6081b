//! Bundled sample data served when the backend cannot be reached.

use crate::models::{Episode, PageResult};
use crate::services::{EpisodeQuery, run_query};

use super::WatchedOverrides;

const BUNDLED_OFFLINE: &str = include_str!("../../data/offline_episodes.json");

/// The bundled document is page-shaped; only its `data` is used.
pub fn bundled_episodes() -> Result<Vec<Episode>, serde_json::Error> {
    let page: PageResult = serde_json::from_str(BUNDLED_OFFLINE)?;
    Ok(page.data)
}

/// Runs `query` over the offline dataset as one page large enough to cover
/// `pages_loaded` pages. Overrides are applied before filtering so a local
/// toggle moves an episode in or out of a `watched` filter.
#[must_use]
pub fn offline_page(
    dataset: &[Episode],
    overrides: &WatchedOverrides,
    query: &EpisodeQuery,
    pages_loaded: u32,
) -> PageResult {
    let source = overrides.apply(dataset.to_vec());
    let query = query
        .clone()
        .with_page(1)
        .with_page_size(query.page_size.saturating_mul(pages_loaded.max(1)));

    PageResult {
        has_more: false,
        ..run_query(source, &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EpisodeId, SortField, SortOrder, WatchedFilter};

    fn unwatched_newest_first(page_size: u32) -> EpisodeQuery {
        EpisodeQuery {
            sort_by: SortField::AirDate,
            order: SortOrder::Descending,
            watched: WatchedFilter::Unwatched,
            page: 1,
            page_size,
            search: String::new(),
        }
    }

    fn ids(page: &PageResult) -> Vec<&str> {
        page.data.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn bundled_dataset_parses() {
        let data = bundled_episodes().unwrap();
        assert_eq!(data.len(), 10);
        assert_eq!(data.iter().filter(|e| !e.watched).count(), 7);
    }

    #[test]
    fn covers_every_loaded_page() {
        let data = bundled_episodes().unwrap();
        let query = unwatched_newest_first(3);

        let page = offline_page(&data, &WatchedOverrides::new(), &query, 2);
        assert_eq!(
            ids(&page),
            vec![
                "orbit-kitchen-s01e03",
                "orbit-kitchen-s01e02",
                "orbit-kitchen-s01e01",
                "harbor-lights-s02e01",
                "harbor-lights-s01e02",
                "quiet-county-s01e03",
            ]
        );
        assert_eq!(page.total, 7);
        assert!(!page.has_more);
    }

    #[test]
    fn overrides_apply_before_filtering() {
        let data = bundled_episodes().unwrap();
        let mut overrides = WatchedOverrides::new();
        overrides.set(EpisodeId::new("orbit-kitchen-s01e03"), true);
        overrides.set(EpisodeId::new("harbor-lights-s01e03"), false);

        let page = offline_page(&data, &overrides, &unwatched_newest_first(20), 1);
        assert_eq!(page.total, 7);
        assert!(!ids(&page).contains(&"orbit-kitchen-s01e03"));
        assert!(ids(&page).contains(&"harbor-lights-s01e03"));
        assert!(page.data.iter().all(|e| !e.watched));
    }

    #[test]
    fn search_is_honoured() {
        let data = bundled_episodes().unwrap();
        let query = EpisodeQuery {
            search: "orbit".to_string(),
            ..unwatched_newest_first(20)
        };

        let page = offline_page(&data, &WatchedOverrides::new(), &query, 1);
        assert_eq!(page.total, 3);
        assert!(page.data.iter().all(|e| e.series_id == "orbit-kitchen"));
    }
}
