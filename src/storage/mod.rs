//! Player and battle stores.
//!
//! The service only sees the [`PlayerStore`] and [`BattleStore`] traits.
//! Two implementations are provided:
//! - JSONL files in the data directory (read-only)
//! - An in-memory store for tests and embedding

mod jsonl;
mod memory;
mod store;

pub use jsonl::*;
pub use memory::*;
pub use store::*;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Battle, PlayerProfile, PlayerWithStats};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Lookups over players and their per-version character stats.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Profile and all character stat records of the player with this
    /// Polaris id.
    async fn find_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<PlayerWithStats>, StorageError>;

    /// Stored primary id of the player with this Polaris id.
    async fn find_player_id_by_polaris_id(
        &self,
        polaris_id: &str,
    ) -> Result<Option<String>, StorageError>;

    /// Case-insensitive substring search on name or Polaris id.
    async fn search_by_name_or_polaris_id(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError>;

    /// Players whose latest battle falls within `window` of now.
    async fn find_active_within(
        &self,
        window: chrono::Duration,
    ) -> Result<Option<Vec<PlayerProfile>>, StorageError>;
}

/// Lookups over recorded battles.
#[async_trait]
pub trait BattleStore: Send + Sync {
    /// All battles the player with this primary id took part in.
    async fn find_all_by_player_id(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<Battle>>, StorageError>;
}

/// Page of results requested from a store. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page of the given size.
    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Items skipped before this page. Saturates for huge page numbers.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    /// Apply this page to an already ordered result list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect()
    }
}

/// Whether a profile matches a search query, ignoring case.
pub fn matches_search(profile: &PlayerProfile, query: &str) -> bool {
    let query = query.to_lowercase();
    profile.name.to_lowercase().contains(&query)
        || profile.polaris_id.to_lowercase().contains(&query)
}

/// Sort search hits by name so paging is stable, then apply the page.
pub(crate) fn page_search_results(
    mut hits: Vec<PlayerProfile>,
    page: &PageRequest,
) -> Vec<PlayerProfile> {
    hits.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.polaris_id.cmp(&b.polaris_id))
    });
    page.slice(hits)
}

/// Keep profiles active since `now - window`, most recent first.
pub(crate) fn active_since(
    profiles: Vec<PlayerProfile>,
    now: i64,
    window: chrono::Duration,
) -> Vec<PlayerProfile> {
    let cutoff = now - window.num_seconds();
    let mut active: Vec<_> = profiles
        .into_iter()
        .filter(|p| p.latest_battle >= cutoff)
        .collect();
    active.sort_by(|a, b| b.latest_battle.cmp(&a.latest_battle));
    active
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
