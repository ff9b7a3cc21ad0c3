//! Player profile and per-version character statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Character identifier as used by the game.
pub type CharacterId = u32;

/// Game version number (e.g. 20001).
pub type GameVersion = u32;

/// A player as held by the player store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Numeric primary id, stored as a string
    pub player_id: String,

    /// Public Polaris id
    pub polaris_id: String,

    /// Display name
    pub name: String,

    /// Region, when known
    #[serde(default)]
    pub region_id: Option<i32>,

    /// Power rating
    pub tekken_power: i64,

    /// Unix timestamp (seconds) of the most recent battle
    pub latest_battle: i64,
}

/// Composite key of a character stat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterStatsKey {
    pub character_id: CharacterId,
    pub game_version: GameVersion,
}

impl CharacterStatsKey {
    pub fn new(character_id: CharacterId, game_version: GameVersion) -> Self {
        Self {
            character_id,
            game_version,
        }
    }
}

/// Wins, losses and rank of one character in one game version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatRecord {
    pub key: CharacterStatsKey,
    pub wins: u32,
    pub losses: u32,
    pub dan_rank: u32,
    /// Unix timestamp (seconds) of the most recent battle in this version
    pub latest_battle: i64,
}

impl CharacterStatRecord {
    pub fn new(key: CharacterStatsKey, wins: u32, losses: u32, dan_rank: u32) -> Self {
        Self {
            key,
            wins,
            losses,
            dan_rank,
            latest_battle: 0,
        }
    }

    pub fn with_latest_battle(mut self, latest_battle: i64) -> Self {
        self.latest_battle = latest_battle;
        self
    }

    pub fn character_id(&self) -> CharacterId {
        self.key.character_id
    }

    pub fn game_version(&self) -> GameVersion {
        self.key.game_version
    }
}

/// A profile together with all of its character stat records.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWithStats {
    pub profile: PlayerProfile,
    pub character_stats: HashMap<CharacterStatsKey, CharacterStatRecord>,
}

impl PlayerWithStats {
    /// Build from a list of records. A later record with the same key
    /// replaces an earlier one.
    pub fn new(
        profile: PlayerProfile,
        records: impl IntoIterator<Item = CharacterStatRecord>,
    ) -> Self {
        let character_stats = records.into_iter().map(|r| (r.key, r)).collect();
        Self {
            profile,
            character_stats,
        }
    }
}
