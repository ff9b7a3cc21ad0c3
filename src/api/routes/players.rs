use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{PlayerMetadata, PlayerSearchResult, PlayerSummary, RecentlyActivePlayer};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerIdResponse {
    pub player_id: String,
}

fn not_found(polaris_id: &str) -> ApiError {
    ApiError::NotFound(format!("player {}", polaris_id.trim()))
}

pub async fn player_stats(
    State(state): State<AppState>,
    Path(polaris_id): Path<String>,
) -> Result<Json<PlayerSummary>, ApiError> {
    state
        .service
        .get_player_stats(&polaris_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&polaris_id))
}

pub async fn player_metadata(
    State(state): State<AppState>,
    Path(polaris_id): Path<String>,
) -> Result<Json<PlayerMetadata>, ApiError> {
    state
        .service
        .get_player_metadata(&polaris_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&polaris_id))
}

pub async fn player_id(
    State(state): State<AppState>,
    Path(polaris_id): Path<String>,
) -> Result<Json<PlayerIdResponse>, ApiError> {
    state
        .service
        .get_player_id(&polaris_id)
        .await?
        .map(|player_id| Json(PlayerIdResponse { player_id }))
        .ok_or_else(|| not_found(&polaris_id))
}

pub async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PlayerSearchResult>>, ApiError> {
    Ok(Json(state.service.search_players(&params.query).await?))
}

pub async fn recently_active_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentlyActivePlayer>>, ApiError> {
    Ok(Json(state.service.get_recently_active_players().await?))
}
