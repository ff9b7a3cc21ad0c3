//! Season classification by game version.

use crate::models::GameVersion;

/// First game version of the current season.
pub const SEASON2_MIN_VERSION: GameVersion = 20001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Previous,
    Current,
}

impl Season {
    pub fn from_version(game_version: GameVersion) -> Self {
        if is_current_season(game_version) {
            Season::Current
        } else {
            Season::Previous
        }
    }
}

pub fn is_current_season(game_version: GameVersion) -> bool {
    game_version >= SEASON2_MIN_VERSION
}
