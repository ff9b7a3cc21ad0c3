//! Aggregated player summaries and the read-only projections built from
//! a player profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Battle, CharacterId, PlayerProfile};

/// Region value reported when a profile has no region.
pub const UNKNOWN_REGION: i32 = -1;

fn region_or_unknown(region_id: Option<i32>) -> i32 {
    region_id.unwrap_or(UNKNOWN_REGION)
}

/// Win/loss tally against one opposing character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub wins: u32,
    pub losses: u32,
}

impl MatchupRecord {
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

}

/// Season-aware summary of one character across all game versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterSummary {
    /// Wins across every version and season
    pub wins: u32,

    /// Losses across every version and season
    pub losses: u32,

    /// Win rate as a percentage, two decimals
    pub win_rate: f64,

    /// Rank in the latest current-season version played
    pub current_season_dan_rank: Option<u32>,

    /// Rank in the latest previous-season version played
    pub previous_season_dan_rank: Option<u32>,

    /// Ranked results against each opposing character
    #[serde(default)]
    pub matchups: BTreeMap<CharacterId, MatchupRecord>,
}

/// Full statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub polaris_id: String,
    pub name: String,
    pub region_id: i32,
    pub tekken_power: i64,
    pub latest_battle: i64,
    pub played_characters: BTreeMap<CharacterId, CharacterSummary>,
    pub battles: Vec<Battle>,
}

impl PlayerSummary {
    pub fn new(
        profile: &PlayerProfile,
        played_characters: BTreeMap<CharacterId, CharacterSummary>,
        battles: Vec<Battle>,
    ) -> Self {
        Self {
            player_id: profile.player_id.clone(),
            polaris_id: profile.polaris_id.clone(),
            name: profile.name.clone(),
            region_id: region_or_unknown(profile.region_id),
            tekken_power: profile.tekken_power,
            latest_battle: profile.latest_battle,
            played_characters,
            battles,
        }
    }
}

/// Profile fields only, no statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetadata {
    pub player_name: String,
    pub polaris_id: String,
    pub region_id: i32,
    pub tekken_power: i64,
    pub latest_battle: i64,
}

impl From<&PlayerProfile> for PlayerMetadata {
    fn from(profile: &PlayerProfile) -> Self {
        Self {
            player_name: profile.name.clone(),
            polaris_id: profile.polaris_id.clone(),
            region_id: region_or_unknown(profile.region_id),
            tekken_power: profile.tekken_power,
            latest_battle: profile.latest_battle,
        }
    }
}

/// One row of a player search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchResult {
    pub name: String,
    pub polaris_id: String,
    pub region_id: i32,
    pub tekken_power: i64,
}

impl From<&PlayerProfile> for PlayerSearchResult {
    fn from(profile: &PlayerProfile) -> Self {
        Self {
            name: profile.name.clone(),
            polaris_id: profile.polaris_id.clone(),
            region_id: region_or_unknown(profile.region_id),
            tekken_power: profile.tekken_power,
        }
    }
}

/// A player seen in a battle within the activity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentlyActivePlayer {
    pub name: String,
    pub polaris_id: String,
    pub region_id: i32,
    pub tekken_power: i64,
    pub latest_battle: i64,
}

impl From<&PlayerProfile> for RecentlyActivePlayer {
    fn from(profile: &PlayerProfile) -> Self {
        Self {
            name: profile.name.clone(),
            polaris_id: profile.polaris_id.clone(),
            region_id: region_or_unknown(profile.region_id),
            tekken_power: profile.tekken_power,
            latest_battle: profile.latest_battle,
        }
    }
}
