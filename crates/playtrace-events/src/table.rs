use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::event::{Action, Event};

/// The immutable source-of-truth table of interaction events.
///
/// Every analysis stage reads from an `EventTable` and produces a new
/// derived table; nothing mutates the source in place. Accessors that
/// aggregate (distinct players, per-game row counts) return freshly built
/// collections keyed in sorted order so downstream output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EventTable {
    events: Vec<Event>,
}

impl EventTable {
    /// Wraps a list of events as a table.
    #[must_use]
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Number of event rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over the event rows in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// All event rows in load order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The set of distinct player identifiers, sorted.
    #[must_use]
    pub fn distinct_players(&self) -> BTreeSet<&str> {
        self.events.iter().map(|e| e.player.as_str()).collect()
    }

    /// The set of distinct game titles, sorted.
    #[must_use]
    pub fn distinct_games(&self) -> BTreeSet<&str> {
        self.events.iter().map(|e| e.game.as_str()).collect()
    }

    /// Distinct players having at least one row with the given action.
    #[must_use]
    pub fn players_with_action(&self, action: Action) -> BTreeSet<&str> {
        self.events
            .iter()
            .filter(|e| e.action == action)
            .map(|e| e.player.as_str())
            .collect()
    }

    /// Raw event-row count per game title, sorted by title.
    ///
    /// Counts rows, not distinct players: a game a player both purchased
    /// and played contributes two rows.
    #[must_use]
    pub fn game_row_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.game.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(player: &str, game: &str, action: Action, value: f64) -> Event {
        Event {
            player: player.into(),
            game: game.into(),
            action,
            value,
        }
    }

    fn sample_table() -> EventTable {
        EventTable::new(vec![
            event("p1", "Mabinogi", Action::Purchase, 1.0),
            event("p1", "Mabinogi", Action::Play, 10.0),
            event("p2", "Vindictus", Action::Purchase, 1.0),
            event("p2", "Mabinogi", Action::Play, 3.5),
            event("p3", "Vindictus", Action::Purchase, 1.0),
        ])
    }

    #[test]
    fn test_distinct_counts() {
        let table = sample_table();
        assert_eq!(table.len(), 5);
        assert_eq!(table.distinct_players().len(), 3);
        assert_eq!(table.distinct_games().len(), 2);
    }

    #[test]
    fn test_players_with_action() {
        let table = sample_table();
        let playing = table.players_with_action(Action::Play);
        assert_eq!(playing.into_iter().collect::<Vec<_>>(), vec!["p1", "p2"]);
        let purchasing = table.players_with_action(Action::Purchase);
        assert_eq!(purchasing.len(), 3);
    }

    #[test]
    fn test_game_row_counts_count_rows_not_players() {
        let table = sample_table();
        let counts = table.game_row_counts();
        assert_eq!(counts["Mabinogi"], 3);
        assert_eq!(counts["Vindictus"], 2);
    }

    #[test]
    fn test_empty_table_aggregates_are_empty() {
        let table = EventTable::default();
        assert!(table.is_empty());
        assert!(table.distinct_players().is_empty());
        assert!(table.game_row_counts().is_empty());
    }
}
