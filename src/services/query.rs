//! Filter, search, sort and paginate over an episode collection.
//!
//! [`run_query`] is pure and trusts its [`EpisodeQuery`]: range checks on
//! `page` and `page_size` happen in request validation, never here. The server
//! runs it over the live store and the client runs it over the bundled offline
//! dataset.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::constants::query::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
use crate::domain::{SortField, SortOrder, WatchedFilter};
use crate::models::{Episode, PageResult};

/// A validated list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeQuery {
    pub sort_by: SortField,
    pub order: SortOrder,
    pub watched: WatchedFilter,
    pub page: u32,
    pub page_size: u32,
    /// Trimmed search text; empty disables the search filter.
    pub search: String,
}

impl Default for EpisodeQuery {
    fn default() -> Self {
        Self {
            sort_by: SortField::default(),
            order: SortOrder::default(),
            watched: WatchedFilter::default(),
            page: FIRST_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

impl EpisodeQuery {
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[must_use]
pub fn run_query(episodes: Vec<Episode>, query: &EpisodeQuery) -> PageResult {
    let needle = query.search.to_lowercase();

    let mut matching: Vec<Episode> = episodes
        .into_iter()
        .filter(|e| query.watched.matches(e.watched))
        .filter(|e| needle.is_empty() || matches_search(e, &needle))
        .collect();

    sort_episodes(&mut matching, query.sort_by, query.order);

    paginate(matching, query.page, query.page_size)
}

/// `needle` must already be lowercased.
#[must_use]
pub fn matches_search(episode: &Episode, needle: &str) -> bool {
    episode.title.to_lowercase().contains(needle)
        || episode.series_title.to_lowercase().contains(needle)
        || episode.description.to_lowercase().contains(needle)
}

/// Stable sort; equal keys keep their incoming order in both directions.
pub fn sort_episodes(episodes: &mut [Episode], sort_by: SortField, order: SortOrder) {
    episodes.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort_by);
        if order.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn compare_by(a: &Episode, b: &Episode, sort_by: SortField) -> Ordering {
    match sort_by {
        SortField::AirDate => a.air_date.cmp(&b.air_date),
        SortField::Title => collate(&a.title, &b.title),
        SortField::SeriesTitle => collate(&a.series_title, &b.series_title),
        SortField::Season => a
            .season
            .cmp(&b.season)
            .then_with(|| a.episode.cmp(&b.episode)),
        SortField::Episode => a
            .episode
            .cmp(&b.episode)
            .then_with(|| a.season.cmp(&b.season)),
    }
}

/// Root-locale Unicode collator shared by every title sort.
static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> =
    LazyLock::new(|| Collator::try_new(Default::default(), CollatorOptions::default()).ok());

/// Locale-aware ordering: accents sort next to their base letter and lower
/// case precedes upper case on otherwise equal text.
fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR
        .as_ref()
        .map_or_else(|| a.cmp(b), |collator| collator.compare(a, b))
}

#[must_use]
pub fn paginate(items: Vec<Episode>, page: u32, page_size: u32) -> PageResult {
    let total = items.len();
    let size = page_size as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(size);
    let end = start.saturating_add(size);

    let data = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(size).collect()
    };

    PageResult {
        data,
        page,
        page_size,
        total,
        has_more: end < total,
    }
}
