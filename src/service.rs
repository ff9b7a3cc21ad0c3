//! Player statistics service.
//!
//! Validates caller input, fetches from the stores and runs the
//! aggregations in [`crate::calculate`]. Every operation is a read; nothing
//! is written back to the stores.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{aggregate_character_stats, process_battles};
use crate::config::StatsConfig;
use crate::models::{
    normalize_player_id, InvalidPolarisId, PlayerMetadata, PlayerSearchResult, PlayerSummary,
    PolarisId, RecentlyActivePlayer,
};
use crate::storage::{BattleStore, PageRequest, PlayerStore, StorageError};

/// Errors returned by [`PlayerService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed Polaris id. Always a client fault.
    #[error(transparent)]
    InvalidPolarisId(#[from] InvalidPolarisId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct PlayerService {
    players: Arc<dyn PlayerStore>,
    battles: Arc<dyn BattleStore>,
    config: StatsConfig,
}

impl PlayerService {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        battles: Arc<dyn BattleStore>,
        config: StatsConfig,
    ) -> Self {
        Self {
            players,
            battles,
            config,
        }
    }

    /// Full statistics for a player: profile fields, per-character
    /// summaries with ranked matchups, and the battle history.
    ///
    /// Returns `Ok(None)` when no player has this Polaris id; the battle
    /// store is not queried in that case.
    pub async fn get_player_stats(
        &self,
        polaris_id: &str,
    ) -> Result<Option<PlayerSummary>, ServiceError> {
        let polaris_id = PolarisId::parse(polaris_id)?;

        let Some(player) = self.players.find_by_polaris_id(polaris_id.as_str()).await? else {
            debug!("No player found for {}", polaris_id);
            return Ok(None);
        };

        let battles = self
            .battles
            .find_all_by_player_id(&player.profile.player_id)
            .await?
            .unwrap_or_default();

        let mut characters = aggregate_character_stats(player.character_stats.values());
        let mut report = process_battles(battles, &player.profile.polaris_id);
        report.attach_matchups(&mut characters);

        info!(
            "Built stats for {}: {} characters, {} battles",
            polaris_id,
            characters.len(),
            report.battles.len()
        );
        Ok(Some(PlayerSummary::new(
            &player.profile,
            characters,
            report.battles,
        )))
    }

    /// Profile fields only. No battles are fetched and nothing is
    /// aggregated.
    pub async fn get_player_metadata(
        &self,
        polaris_id: &str,
    ) -> Result<Option<PlayerMetadata>, ServiceError> {
        let polaris_id = PolarisId::parse(polaris_id)?;

        let player = self.players.find_by_polaris_id(polaris_id.as_str()).await?;
        Ok(player.map(|p| PlayerMetadata::from(&p.profile)))
    }

    /// Primary player id for a Polaris id, zero-padded to 18 characters.
    pub async fn get_player_id(&self, polaris_id: &str) -> Result<Option<String>, ServiceError> {
        let polaris_id = PolarisId::parse(polaris_id)?;

        let player_id = self
            .players
            .find_player_id_by_polaris_id(polaris_id.as_str())
            .await?;
        Ok(player_id.map(|id| normalize_player_id(&id)))
    }

    /// Search players by name or Polaris id.
    ///
    /// The first page is requested from the store with the configured page
    /// size. The store owns paging; its results are passed through as is.
    pub async fn search_players(
        &self,
        query: &str,
    ) -> Result<Vec<PlayerSearchResult>, ServiceError> {
        let page = PageRequest::first(self.config.search_page_size);
        let players = self
            .players
            .search_by_name_or_polaris_id(query, &page)
            .await?
            .unwrap_or_default();

        debug!("Search {:?} matched {} players", query, players.len());
        Ok(players.iter().map(PlayerSearchResult::from).collect())
    }

    /// Players with a battle inside the configured activity window.
    pub async fn get_recently_active_players(
        &self,
    ) -> Result<Vec<RecentlyActivePlayer>, ServiceError> {
        let players = self
            .players
            .find_active_within(self.config.active_window())
            .await?
            .unwrap_or_default();

        Ok(players.iter().map(RecentlyActivePlayer::from).collect())
    }
}
