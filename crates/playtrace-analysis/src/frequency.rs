//! Top-N game listing by raw event-row frequency.

use std::cmp::Reverse;

use playtrace_events::EventTable;

/// Returns the `n` game titles with the most event rows, alphabetically
/// sorted.
///
/// Ranking counts raw rows, not distinct players: a title a player both
/// purchased and played contributes two rows. Ties at the cutoff are
/// broken by title ascending so the selection is deterministic. The
/// returned list is then re-sorted alphabetically, discarding the rank
/// order; callers that need counts should use
/// [`EventTable::game_row_counts`] directly.
///
/// Returns `min(n, distinct_game_count)` titles.
#[must_use]
pub fn top_games_by_row_count(events: &EventTable, n: usize) -> Vec<String> {
    let mut ranked: Vec<(&str, usize)> = events.game_row_counts().into_iter().collect();
    ranked.sort_by_key(|&(title, count)| (Reverse(count), title));
    ranked.truncate(n);

    let mut titles: Vec<String> = ranked
        .into_iter()
        .map(|(title, _)| title.to_string())
        .collect();
    titles.sort();
    titles
}

#[cfg(test)]
mod tests {
    use playtrace_events::{Action, Event};

    use super::*;

    fn rows(counts: &[(&str, usize)]) -> EventTable {
        let mut events = vec![];
        for &(game, count) in counts {
            for idx in 0..count {
                events.push(Event {
                    player: format!("p{idx}"),
                    game: game.into(),
                    action: Action::Play,
                    value: 1.0,
                });
            }
        }
        EventTable::new(events)
    }

    #[test]
    fn test_selects_by_frequency_returns_alphabetical() {
        let table = rows(&[("Zeta", 5), ("Alpha", 3), ("Mid", 4), ("Rare", 1)]);
        // Top 3 by frequency are Zeta, Mid, Alpha; output re-sorted.
        assert_eq!(
            top_games_by_row_count(&table, 3),
            vec!["Alpha", "Mid", "Zeta"]
        );
    }

    #[test]
    fn test_n_larger_than_game_count() {
        let table = rows(&[("B", 2), ("A", 1)]);
        assert_eq!(top_games_by_row_count(&table, 10), vec!["A", "B"]);
    }

    #[test]
    fn test_tie_at_cutoff_prefers_alphabetical() {
        // Three titles with equal counts competing for two slots.
        let table = rows(&[("Charlie", 2), ("Bravo", 2), ("Alpha", 2)]);
        assert_eq!(
            top_games_by_row_count(&table, 2),
            vec!["Alpha", "Bravo"]
        );
    }

    #[test]
    fn test_zero_n_and_empty_table() {
        let table = rows(&[("A", 3)]);
        assert!(top_games_by_row_count(&table, 0).is_empty());
        assert!(top_games_by_row_count(&EventTable::default(), 5).is_empty());
    }
}
