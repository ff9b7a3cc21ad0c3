//! Per-character aggregation of versioned stat records.

use std::collections::{BTreeMap, HashMap};

use super::{calculate_win_rate, Season};
use crate::models::{CharacterId, CharacterStatRecord, CharacterSummary, GameVersion};

/// Reduce a player's stat records into one summary per character.
///
/// Wins and losses are summed over every record of a character regardless
/// of season. Each season's rank comes from the record with the greatest
/// game version in that season. Records are not assumed to be in any order.
pub fn aggregate_character_stats<'a, I>(records: I) -> BTreeMap<CharacterId, CharacterSummary>
where
    I: IntoIterator<Item = &'a CharacterStatRecord>,
{
    let mut by_character: HashMap<CharacterId, Vec<&CharacterStatRecord>> = HashMap::new();
    for record in records {
        by_character
            .entry(record.character_id())
            .or_default()
            .push(record);
    }

    by_character
        .into_iter()
        .map(|(character_id, records)| (character_id, summarize(&records)))
        .collect()
}

fn summarize(records: &[&CharacterStatRecord]) -> CharacterSummary {
    let wins = records.iter().fold(0u32, |acc, r| acc.saturating_add(r.wins));
    let losses = records
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(r.losses));

    CharacterSummary {
        wins,
        losses,
        win_rate: calculate_win_rate(wins, losses),
        current_season_dan_rank: latest_in_season(records, Season::Current).map(|r| r.dan_rank),
        previous_season_dan_rank: latest_in_season(records, Season::Previous).map(|r| r.dan_rank),
        matchups: BTreeMap::new(),
    }
}

/// Representative record of a season: greatest game version, then the most
/// recent battle, then the higher rank.
fn latest_in_season<'a>(
    records: &[&'a CharacterStatRecord],
    season: Season,
) -> Option<&'a CharacterStatRecord> {
    records
        .iter()
        .copied()
        .filter(|r| Season::from_version(r.game_version()) == season)
        .max_by_key(|r| recency(r))
}

fn recency(record: &CharacterStatRecord) -> (GameVersion, i64, u32) {
    (record.game_version(), record.latest_battle, record.dan_rank)
}
