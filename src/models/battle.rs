//! Battles: one recorded match between two players.

use serde::{Deserialize, Serialize};

use super::{CharacterId, GameVersion};

/// Kind of match a battle was played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleType {
    Ranked,
    Quick,
    Group,
    Player,
    #[serde(other)]
    Unknown,
}

impl BattleType {
    /// Only ranked battles count towards matchup statistics.
    pub fn is_ranked(&self) -> bool {
        matches!(self, BattleType::Ranked)
    }
}

impl std::fmt::Display for BattleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleType::Ranked => write!(f, "ranked"),
            BattleType::Quick => write!(f, "quick"),
            BattleType::Group => write!(f, "group"),
            BattleType::Player => write!(f, "player"),
            BattleType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Side of a battle, as numbered by the winner indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn number(&self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// One player's participation in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePlayer {
    pub name: String,

    /// Primary player id
    pub player_id: String,

    pub polaris_id: String,

    pub character_id: CharacterId,

    #[serde(default)]
    pub region_id: Option<i32>,

    pub tekken_power: i64,

    pub dan_rank: u32,

    pub rounds_won: u32,
}

/// A recorded battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub battle_id: String,

    /// Calendar date of the battle (YYYY-MM-DD)
    pub date: String,

    /// Unix timestamp (seconds)
    pub battle_at: i64,

    pub battle_type: BattleType,

    pub game_version: GameVersion,

    pub player1: BattlePlayer,

    pub player2: BattlePlayer,

    /// 1 or 2, naming the winning side
    pub winner: u8,

    pub stage_id: u32,
}

impl Battle {
    pub fn player(&self, side: Side) -> &BattlePlayer {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    /// Whether the given side won this battle.
    pub fn won_by(&self, side: Side) -> bool {
        self.winner == side.number()
    }

    /// Whether the player with this primary id took part.
    pub fn involves_player(&self, player_id: &str) -> bool {
        self.player1.player_id == player_id || self.player2.player_id == player_id
    }
}
