use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::{ApiError, AppState, FieldError};
use crate::api::validation::{validate_list_pairs, validate_set_watched};
use crate::domain::EpisodeId;
use crate::models::{Episode, PageResult};

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<PageResult>, ApiError> {
    let Query(pairs) = pairs.map_err(|e| {
        ApiError::invalid_fields(vec![FieldError::new("query", e.body_text())])
    })?;
    let query = validate_list_pairs(pairs)?;

    let page = state.episode_service.list_episodes(&query).await?;
    Ok(Json(page))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Episode>, ApiError> {
    let episode = state
        .episode_service
        .get_episode(&EpisodeId::from(id))
        .await?;
    Ok(Json(episode))
}

/// The id is resolved before the body is validated, so an unknown id is a 404
/// whatever the body holds.
pub async fn set_watched(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Episode>, ApiError> {
    let id = EpisodeId::from(id);
    state.episode_service.get_episode(&id).await?;

    let watched = validate_set_watched(&body)?;
    let updated = state.episode_service.set_watched(&id, watched).await?;

    Ok(Json(updated))
}
