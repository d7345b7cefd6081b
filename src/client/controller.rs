//! Paged episode list with filters, local watched overrides and an offline
//! fallback.
//!
//! All mutable state sits behind one async mutex that is released before any
//! network call. A load takes a ticket under the lock, performs the
//! request unlocked and hands the result back under the lock again. Tickets
//! carry the generation they were issued in; changing filters bumps the
//! generation so that a response to the old filters is dropped on arrival.
//!
//! Override writes happen outside the state lock. Each toggle numbers the map
//! it produced, and a write is skipped when a later map is already on disk.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::offline::offline_page;
use super::{ClientError, EpisodeApi, OverrideStore, WatchedOverrides};
use crate::constants::client::OFFLINE_NOTICE;
use crate::constants::query::FIRST_PAGE;
use crate::domain::{EpisodeId, SortField, SortOrder, WatchedFilter};
use crate::models::{Episode, PageResult};
use crate::services::EpisodeQuery;

/// User-facing list filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    /// Only request unwatched episodes.
    pub hide_watched: bool,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub search: String,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            hide_watched: true,
            sort_by: SortField::AirDate,
            order: SortOrder::Descending,
            search: String::new(),
        }
    }
}

impl ListFilters {
    #[must_use]
    pub fn query(&self, page: u32, page_size: u32) -> EpisodeQuery {
        EpisodeQuery {
            sort_by: self.sort_by,
            order: self.order,
            watched: if self.hide_watched {
                WatchedFilter::Unwatched
            } else {
                WatchedFilter::All
            },
            page,
            page_size,
            search: self.search.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Reset,
    Append,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Remote page applied.
    Loaded,
    /// Remote failed; bundled data shown instead.
    Offline,
    /// Another load was pending or there was nothing more to fetch.
    Skipped,
    /// Filters changed while the request was in flight.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    Absorbed,
}

/// Point-in-time copy of the list for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub items: Vec<Episode>,
    pub has_more: bool,
    pub next_page: u32,
    pub phase: LoadPhase,
    pub notice: Option<String>,
    pub filters: ListFilters,
}

/// A toggle already applied locally and waiting to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSync {
    pub episode: Episode,
}

#[derive(Debug)]
struct LoadTicket {
    generation: u64,
    kind: LoadKind,
    query: EpisodeQuery,
}

#[derive(Debug)]
struct ListState {
    items: Vec<Episode>,
    next_page: u32,
    has_more: bool,
    phase: LoadPhase,
    notice: Option<String>,
    filters: ListFilters,
    overrides: WatchedOverrides,
    override_revision: u64,
    generation: u64,
}

impl ListState {
    fn new(filters: ListFilters, overrides: WatchedOverrides) -> Self {
        Self {
            items: Vec::new(),
            next_page: FIRST_PAGE,
            has_more: true,
            phase: LoadPhase::Idle,
            notice: None,
            filters,
            overrides,
            override_revision: 0,
            generation: 0,
        }
    }

    fn begin(&mut self, kind: LoadKind, page_size: u32) -> Option<LoadTicket> {
        if self.phase != LoadPhase::Idle {
            return None;
        }
        if kind == LoadKind::Append && !self.has_more {
            return None;
        }
        Some(self.start(kind, page_size))
    }

    fn supersede(&mut self, filters: ListFilters, page_size: u32) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.filters = filters;
        self.start(LoadKind::Reset, page_size)
    }

    fn start(&mut self, kind: LoadKind, page_size: u32) -> LoadTicket {
        self.phase = match kind {
            LoadKind::Refresh => LoadPhase::Refreshing,
            LoadKind::Reset | LoadKind::Append => LoadPhase::Loading,
        };

        let page = match kind {
            LoadKind::Append => self.next_page,
            LoadKind::Reset | LoadKind::Refresh => FIRST_PAGE,
        };

        LoadTicket {
            generation: self.generation,
            kind,
            query: self.filters.query(page, page_size),
        }
    }

    fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<PageResult, ClientError>,
        offline: &[Episode],
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "Dropping response for superseded filters"
            );
            return LoadOutcome::Stale;
        }

        self.phase = LoadPhase::Idle;
        let requested = ticket.query.page;

        match result {
            Ok(page) => {
                let data = self.overrides.apply(page.data);
                if ticket.kind == LoadKind::Append {
                    self.items.extend(data);
                } else {
                    self.items = data;
                }
                self.has_more = page.has_more;
                self.next_page = requested.saturating_add(1);
                self.notice = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!(error = %e, page = requested, "Episode fetch failed, showing offline data");
                let page = offline_page(offline, &self.overrides, &ticket.query, requested);
                self.items = page.data;
                self.has_more = false;
                self.next_page = requested.saturating_add(1);
                self.notice = Some(OFFLINE_NOTICE.to_string());
                LoadOutcome::Offline
            }
        }
    }

    fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            items: self.items.clone(),
            has_more: self.has_more,
            next_page: self.next_page,
            phase: self.phase,
            notice: self.notice.clone(),
            filters: self.filters.clone(),
        }
    }
}

pub struct ListController {
    api: Arc<dyn EpisodeApi>,
    override_store: Arc<dyn OverrideStore>,
    offline: Vec<Episode>,
    page_size: u32,
    state: Mutex<ListState>,
    /// Revision of the last override map written to the store.
    persisted_revision: Mutex<u64>,
}

impl ListController {
    /// Reads the persisted overrides once; a failure starts from an empty map.
    pub async fn new(
        api: Arc<dyn EpisodeApi>,
        override_store: Arc<dyn OverrideStore>,
        offline: Vec<Episode>,
        page_size: u32,
        filters: ListFilters,
    ) -> Self {
        let overrides = match override_store.load().await {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!(error = %e, "Failed to load watched overrides, starting empty");
                WatchedOverrides::new()
            }
        };

        Self {
            api,
            override_store,
            offline,
            page_size,
            state: Mutex::new(ListState::new(filters, overrides)),
            persisted_revision: Mutex::new(0),
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn overrides(&self) -> WatchedOverrides {
        self.state.lock().await.overrides.clone()
    }

    /// First page with the current filters.
    pub async fn load_initial(&self) -> LoadOutcome {
        self.request(LoadKind::Reset).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.request(LoadKind::Refresh).await
    }

    pub async fn load_more(&self) -> LoadOutcome {
        self.request(LoadKind::Append).await
    }

    /// Replaces the filters and reloads from page 1, discarding whatever load
    /// was pending.
    pub async fn set_filters(&self, filters: ListFilters) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            state.supersede(filters, self.page_size)
        };
        self.execute(ticket).await
    }

    async fn request(&self, kind: LoadKind) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            state.begin(kind, self.page_size)
        };

        match ticket {
            Some(ticket) => self.execute(ticket).await,
            None => {
                debug!(?kind, "Load skipped");
                LoadOutcome::Skipped
            }
        }
    }

    async fn execute(&self, ticket: LoadTicket) -> LoadOutcome {
        let result = self.api.fetch_episodes(&ticket.query).await;
        let mut state = self.state.lock().await;
        state.complete(ticket, result, &self.offline)
    }

    /// Flips `watched` locally and then tells the backend. Returns the
    /// episode as now shown, or `None` if it is not in the list.
    pub async fn toggle_watched(&self, id: &EpisodeId) -> Option<Episode> {
        let pending = self.commit_local(id).await?;
        self.sync_remote(&pending).await;
        Some(pending.episode)
    }

    /// Applies the toggle to the shown list and the override map, then
    /// persists the map. Persist failures are logged only.
    pub async fn commit_local(&self, id: &EpisodeId) -> Option<PendingSync> {
        let (episode, overrides, revision) = {
            let mut state = self.state.lock().await;

            let item = state.items.iter_mut().find(|e| &e.id == id)?;
            item.watched = !item.watched;
            let episode = item.clone();

            state.overrides.set(id.clone(), episode.watched);
            state.override_revision += 1;
            (episode, state.overrides.clone(), state.override_revision)
        };

        self.persist(&overrides, revision).await;
        Some(PendingSync { episode })
    }

    async fn persist(&self, overrides: &WatchedOverrides, revision: u64) {
        let mut written = self.persisted_revision.lock().await;
        if *written >= revision {
            debug!(revision, written = *written, "Override map already superseded on disk");
            return;
        }

        match self.override_store.save(overrides).await {
            Ok(()) => *written = revision,
            Err(e) => warn!(error = %e, revision, "Failed to persist watched overrides"),
        }
    }

    /// Sends a committed toggle. The local state stays as committed whatever
    /// the backend says.
    pub async fn sync_remote(&self, pending: &PendingSync) -> SyncOutcome {
        let episode = &pending.episode;
        match self.api.set_watched(&episode.id, episode.watched).await {
            Ok(_) => {
                info!(episode_id = %episode.id, watched = episode.watched, "Synced watched state");
                SyncOutcome::Synced
            }
            Err(e) => {
                debug!(error = %e, episode_id = %episode.id, "Watched sync failed, keeping local state");
                SyncOutcome::Absorbed
            }
        }
    }
}
