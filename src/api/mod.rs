use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{Store, seed};
use crate::models::Episode;
use crate::services::{EpisodeService, StoreEpisodeService};

pub mod episodes;
mod error;
mod observability;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub episode_service: Arc<dyn EpisodeService>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, store: Store) -> Self {
        let episode_service =
            Arc::new(StoreEpisodeService::new(Arc::new(store))) as Arc<dyn EpisodeService>;

        Self {
            config: Arc::new(config),
            episode_service,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Builds the state with the store seeded from config (or the bundled catalog).
pub fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let episodes = seed::load(config.server.seed_path.as_deref())?;
    Ok(create_app_state_with_episodes(config, episodes))
}

#[must_use]
pub fn create_app_state_with_episodes(config: Config, episodes: Vec<Episode>) -> Arc<AppState> {
    let store = Store::with_episodes(episodes);
    Arc::new(AppState::new(config, store))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/health", get(health))
        .route("/episodes", get(episodes::list_episodes))
        .route("/episodes/{id}", get(episodes::get_episode))
        .route("/episodes/{id}/watched", patch(episodes::set_watched))
        .with_state(state)
        .layer(middleware::from_fn(observability::request_logging))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
