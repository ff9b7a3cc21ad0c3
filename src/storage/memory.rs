//! In-memory store.
//!
//! Holds players and battles in vectors and records every query it
//! receives, so callers can check which lookups were made.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    active_since, matches_search, page_search_results, BattleStore, PageRequest, PlayerStore,
    StorageError,
};
use crate::models::{Battle, PlayerProfile, PlayerWithStats};

/// A query received by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FindByPolarisId(String),
    FindPlayerId(String),
    Search { query: String, page: PageRequest },
    FindActive,
    FindBattles(String),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Vec<PlayerWithStats>,
    battles: Vec<Battle>,
    now: Option<i64>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, player: PlayerWithStats) -> Self {
        self.players.push(player);
        self
    }

    /// Battles are returned in the order they were added.
    pub fn with_battles(mut self, battles: impl IntoIterator<Item = Battle>) -> Self {
        self.battles.extend(battles);
        self
    }

    /// Fix the clock used for the activity window.
    pub fn with_now(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }

    /// Every query received so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: StoreCall) {
        self.calls.lock().await.push(call);
    }

    fn profile(&self, polaris_id: &str) -> Option<&PlayerWithStats> {
        self.players
            .iter()
            .find(|p| p.profile.polaris_id == polaris_id)
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn find_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<PlayerWithStats>, StorageError> {
        self.record(StoreCall::FindByPolarisId(polaris_id.to_string()))
            .await;
        Ok(self.profile(polaris_id).cloned())
    }

    async fn find_player_id_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<String>, StorageError> {
        self.record(StoreCall::FindPlayerId(polaris_id.to_string()))
            .await;
        Ok(self
            .profile(polaris_id)
            .map(|p| p.profile.player_id.clone()))
    }

    async fn search_by_name_or_polaris_id(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError> {
        self.record(StoreCall::Search {
            query: query.to_string(),
            page: page.clone(),
        })
        .await;

        let hits: Vec<_> = self
            .players
            .iter()
            .map(|p| &p.profile)
            .filter(|p| matches_search(p, query))
            .cloned()
            .collect();
        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(page_search_results(hits, page)))
    }

    async fn find_active_within(
        &self,
        window: chrono::Duration,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError> {
        self.record(StoreCall::FindActive).await;

        let now = self.now.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let profiles = self.players.iter().map(|p| p.profile.clone()).collect();
        let active = active_since(profiles, now, window);
        if active.is_empty() {
            return Ok(None);
        }
        Ok(Some(active))
    }
}

#[async_trait]
impl BattleStore for MemoryStore {
    async fn find_all_by_player_id(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<Battle>>, StorageError> {
        self.record(StoreCall::FindBattles(player_id.to_string()))
            .await;

        let battles: Vec<_> = self
            .battles
            .iter()
            .filter(|b| b.involves_player(player_id))
            .cloned()
            .collect();
        if battles.is_empty() {
            return Ok(None);
        }
        Ok(Some(battles))
    }
}
