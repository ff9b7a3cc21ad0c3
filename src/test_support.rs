//! Shared fixtures for unit tests.

use crate::models::{Battle, BattlePlayer, BattleType};

pub(crate) fn battle_player(name: &str, polaris_id: &str, character_id: u32) -> BattlePlayer {
    BattlePlayer {
        name: name.to_string(),
        player_id: format!("id-{}", polaris_id),
        polaris_id: polaris_id.to_string(),
        character_id,
        region_id: Some(1),
        tekken_power: 100000,
        dan_rank: 15,
        rounds_won: 0,
    }
}

pub(crate) fn battle(
    id: &str,
    battle_type: BattleType,
    player1: BattlePlayer,
    player2: BattlePlayer,
    winner: u8,
) -> Battle {
    Battle {
        battle_id: id.to_string(),
        date: "2025-01-01".to_string(),
        battle_at: 1735689600,
        battle_type,
        game_version: 20001,
        player1,
        player2,
        winner,
        stage_id: 1,
    }
}
