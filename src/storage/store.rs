//! Read-only store over the JSONL files in the data directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    active_since, matches_search, page_search_results, BattleStore, EntityType, JsonlReader,
    PageRequest, PlayerStore, StorageConfig, StorageError,
};
use crate::models::{
    Battle, CharacterId, CharacterStatRecord, CharacterStatsKey, GameVersion, PlayerProfile,
    PlayerWithStats,
};

/// One line of `character_stats.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatsRow {
    pub player_id: String,
    pub character_id: CharacterId,
    pub game_version: GameVersion,
    pub wins: u32,
    pub losses: u32,
    pub dan_rank: u32,
    #[serde(default)]
    pub latest_battle: i64,
}

impl From<CharacterStatsRow> for CharacterStatRecord {
    fn from(row: CharacterStatsRow) -> Self {
        CharacterStatRecord::new(
            CharacterStatsKey::new(row.character_id, row.game_version),
            row.wins,
            row.losses,
            row.dan_rank,
        )
        .with_latest_battle(row.latest_battle)
    }
}

/// Store backed by `players.jsonl`, `character_stats.jsonl` and
/// `battles.jsonl`. Files are re-read on every query.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    /// Open a store over an existing data directory.
    pub fn open(config: StorageConfig) -> Result<Self, StorageError> {
        if !config.data_dir.is_dir() {
            return Err(StorageError::PathNotFound(config.data_dir.clone()));
        }
        Ok(Self { config })
    }

    fn players(&self) -> JsonlReader<PlayerProfile> {
        JsonlReader::for_entity(&self.config, EntityType::Player)
    }

    fn find_profile(&self, polaris_id: &str) -> Result<Option<PlayerProfile>, StorageError> {
        self.players().find(|p| p.polaris_id == polaris_id)
    }
}

#[async_trait]
impl PlayerStore for JsonlStore {
    async fn find_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<PlayerWithStats>, StorageError> {
        let Some(profile) = self.find_profile(polaris_id)? else {
            return Ok(None);
        };

        let rows = JsonlReader::<CharacterStatsRow>::for_entity(
            &self.config,
            EntityType::CharacterStats,
        )
        .read_where(|r| r.player_id == profile.player_id)?;

        debug!(
            "Loaded {} character stat rows for {}",
            rows.len(),
            profile.polaris_id
        );
        Ok(Some(PlayerWithStats::new(
            profile,
            rows.into_iter().map(CharacterStatRecord::from),
        )))
    }

    async fn find_player_id_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<String>, StorageError> {
        Ok(self.find_profile(polaris_id)?.map(|p| p.player_id))
    }

    async fn search_by_name_or_polaris_id(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError> {
        let hits = self.players().read_where(|p| matches_search(p, query))?;
        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(page_search_results(hits, page)))
    }

    async fn find_active_within(
        &self,
        window: chrono::Duration,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError> {
        let now = chrono::Utc::now().timestamp();
        let active = active_since(self.players().read_all()?, now, window);
        if active.is_empty() {
            return Ok(None);
        }
        Ok(Some(active))
    }
}

#[async_trait]
impl BattleStore for JsonlStore {
    async fn find_all_by_player_id(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<Battle>>, StorageError> {
        let mut battles = JsonlReader::<Battle>::for_entity(&self.config, EntityType::Battle)
            .read_where(|b| b.involves_player(player_id))?;
        if battles.is_empty() {
            return Ok(None);
        }
        battles.sort_by(|a, b| b.battle_at.cmp(&a.battle_at));
        Ok(Some(battles))
    }
}
