//! Battle history and ranked matchup accounting.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Battle, CharacterId, CharacterSummary, MatchupRecord, Side};

/// Ranked results keyed by the player's character, then the opponent's.
pub type MatchupCounters = BTreeMap<CharacterId, BTreeMap<CharacterId, MatchupRecord>>;

/// Output of walking a player's battle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattleReport {
    /// Every battle, in input order
    pub battles: Vec<Battle>,
    pub matchups: MatchupCounters,
}

impl BattleReport {
    /// Move the matchup tallies onto per-character summaries. A character
    /// with ranked battles but no stat records gets an empty summary.
    pub fn attach_matchups(
        &mut self,
        summaries: &mut BTreeMap<CharacterId, CharacterSummary>,
    ) {
        for (character_id, matchups) in std::mem::take(&mut self.matchups) {
            summaries.entry(character_id).or_default().matchups = matchups;
        }
    }
}

/// Which side of the battle the player with this Polaris id is on.
///
/// Side 1 when player 1's id matches, otherwise side 2. Battles come from
/// a per-player query, so one of the two sides is always the player.
pub fn player_side(battle: &Battle, polaris_id: &str) -> Side {
    if battle.player1.polaris_id == polaris_id {
        Side::One
    } else {
        Side::Two
    }
}

/// Walk a player's battles in order, building the history and counting
/// ranked results per character matchup. Non-ranked battles appear in the
/// history but are not counted.
pub fn process_battles(battles: Vec<Battle>, polaris_id: &str) -> BattleReport {
    let mut report = BattleReport {
        battles: Vec::with_capacity(battles.len()),
        matchups: MatchupCounters::new(),
    };

    for battle in battles {
        if battle.battle_type.is_ranked() {
            let side = player_side(&battle, polaris_id);
            let own = battle.player(side).character_id;
            let opponent = battle.player(side.opposite()).character_id;

            report
                .matchups
                .entry(own)
                .or_default()
                .entry(opponent)
                .or_default()
                .record(battle.won_by(side));
        }
        report.battles.push(battle);
    }

    debug!(
        "Processed {} battles into {} character matchup tables",
        report.battles.len(),
        report.matchups.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BattlePlayer, BattleType};
    use crate::test_support::{battle, battle_player};
    use pretty_assertions::assert_eq;

    fn me(character_id: u32) -> BattlePlayer {
        battle_player("TestPlayer", "ABC123456789", character_id)
    }

    fn opp(character_id: u32) -> BattlePlayer {
        battle_player("Opponent", "DEF987654321", character_id)
    }

    #[test]
    fn test_player_side() {
        let b = battle("b1", BattleType::Ranked, me(32), opp(28), 1);
        assert_eq!(player_side(&b, "ABC123456789"), Side::One);
        assert_eq!(player_side(&b, "DEF987654321"), Side::Two);
    }

    #[test]
    fn test_ranked_win_as_player1() {
        let b = battle("b1", BattleType::Ranked, me(32), opp(28), 1);

        let report = process_battles(vec![b], "ABC123456789");

        assert_eq!(report.battles.len(), 1);
        assert_eq!(
            report.matchups[&32][&28],
            MatchupRecord { wins: 1, losses: 0 }
        );
    }

    #[test]
    fn test_ranked_win_as_player2() {
        let b = battle("b1", BattleType::Ranked, opp(28), me(32), 2);

        let report = process_battles(vec![b], "ABC123456789");

        assert_eq!(
            report.matchups[&32][&28],
            MatchupRecord { wins: 1, losses: 0 }
        );
        assert!(!report.matchups.contains_key(&28));
    }

    #[test]
    fn test_ranked_loss_as_player2() {
        let b = battle("b1", BattleType::Ranked, opp(28), me(32), 1);

        let report = process_battles(vec![b], "ABC123456789");

        assert_eq!(
            report.matchups[&32][&28],
            MatchupRecord { wins: 0, losses: 1 }
        );
    }

    #[test]
    fn test_non_ranked_battles_only_in_history() {
        let battles = vec![
            battle("quick", BattleType::Quick, me(32), opp(28), 1),
            battle("group", BattleType::Group, me(32), opp(28), 1),
            battle("player", BattleType::Player, opp(28), me(32), 2),
        ];

        let report = process_battles(battles, "ABC123456789");

        assert!(report.matchups.is_empty());
        let ids: Vec<_> = report.battles.iter().map(|b| b.battle_id.as_str()).collect();
        assert_eq!(ids, vec!["quick", "group", "player"]);
    }

    #[test]
    fn test_mixed_battles_preserve_order_and_counts() {
        let battles = vec![
            battle("b1", BattleType::Ranked, me(32), opp(28), 1),
            battle("b2", BattleType::Quick, me(32), opp(28), 2),
            battle("b3", BattleType::Ranked, me(32), opp(30), 2),
            battle("b4", BattleType::Ranked, opp(28), me(32), 1),
            battle("b5", BattleType::Ranked, opp(28), me(7), 2),
        ];

        let report = process_battles(battles, "ABC123456789");

        let ids: Vec<_> = report.battles.iter().map(|b| b.battle_id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3", "b4", "b5"]);
        assert_eq!(
            report.matchups[&32][&28],
            MatchupRecord { wins: 1, losses: 1 }
        );
        assert_eq!(
            report.matchups[&32][&30],
            MatchupRecord { wins: 0, losses: 1 }
        );
        assert_eq!(
            report.matchups[&7][&28],
            MatchupRecord { wins: 1, losses: 0 }
        );
    }

    #[test]
    fn test_empty_battles() {
        let report = process_battles(Vec::new(), "ABC123456789");
        assert_eq!(report, BattleReport::default());
    }

    #[test]
    fn test_attach_matchups() {
        let battles = vec![
            battle("b1", BattleType::Ranked, me(32), opp(28), 1),
            battle("b2", BattleType::Ranked, me(7), opp(28), 2),
        ];
        let mut report = process_battles(battles, "ABC123456789");

        let mut summaries = BTreeMap::new();
        summaries.insert(
            32,
            CharacterSummary {
                wins: 10,
                losses: 5,
                ..Default::default()
            },
        );

        report.attach_matchups(&mut summaries);

        assert!(report.matchups.is_empty());
        assert_eq!(summaries[&32].wins, 10);
        assert_eq!(summaries[&32].matchups[&28].wins, 1);
        // Character 7 has no stat records but still gets its ranked matchups
        assert_eq!(summaries[&7].wins, 0);
        assert_eq!(summaries[&7].matchups[&28].losses, 1);
    }
}
