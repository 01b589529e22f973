//! Per-player affiliation flags for a configured list of tracked titles.
//!
//! A player is "affiliated" with a tracked title if they have at least one
//! play action on it; purchase-only contact does not count. The flags
//! collapse into a single categorical [`PlayerType`] used downstream as a
//! class label.
//!
//! Flag derivation is set membership: one pass builds the distinct
//! play-player set per tracked title, a second pass derives each player's
//! flag vector from set lookups.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use playtrace_events::{Action, Event, EventTable};
use serde::{Serialize, Serializer};

/// Categorical label derived from a player's tracked-title flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerType {
    /// No tracked title was played.
    NonAffiliated,
    /// Exactly one tracked title was played; carries that title.
    Affiliated(String),
    /// Two or more tracked titles were played.
    MultiAffiliated,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonAffiliated => f.write_str("non_affiliated"),
            Self::Affiliated(title) => f.write_str(title),
            Self::MultiAffiliated => f.write_str("affiliated_multi"),
        }
    }
}

impl Serialize for PlayerType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Affiliation flags and derived type for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAffiliation {
    /// Player identifier.
    pub player: String,
    /// One flag per tracked title, in configuration order.
    pub flags: Vec<bool>,
    /// Logical OR across the tracked flags.
    pub combined: bool,
    /// Categorical label derived from the flags.
    pub player_type: PlayerType,
}

/// An event row paired with its player's affiliation flags.
///
/// This reproduces the augmented-event-table view of the classifier
/// output without copying the source rows.
#[derive(Debug, Clone)]
pub struct FlaggedEvent<'a> {
    /// The source event row.
    pub event: &'a Event,
    /// One flag per tracked title, in configuration order.
    pub flags: &'a [bool],
    /// Logical OR across the tracked flags.
    pub combined: bool,
    /// The player's derived type.
    pub player_type: &'a PlayerType,
}

/// Affiliation flags for every player in an event table.
#[derive(Debug, Clone)]
pub struct AffiliationTable {
    tracked: Vec<String>,
    players: BTreeMap<String, PlayerAffiliation>,
    // Fallback row for players outside the table.
    unflagged: Vec<bool>,
    non_affiliated: PlayerType,
}

impl AffiliationTable {
    /// Builds flags from play actions on the tracked titles.
    ///
    /// Every distinct player in the table gets an entry, including players
    /// whose only activity is elsewhere (all flags false, type
    /// `non_affiliated`).
    #[must_use]
    pub fn from_events(events: &EventTable, tracked: &[String]) -> Self {
        let memberships: Vec<BTreeSet<&str>> = tracked
            .iter()
            .map(|title| {
                events
                    .iter()
                    .filter(|e| e.action == Action::Play && e.game == *title)
                    .map(|e| e.player.as_str())
                    .collect()
            })
            .collect();

        let players = events
            .distinct_players()
            .into_iter()
            .map(|player| {
                let flags: Vec<bool> = memberships.iter().map(|m| m.contains(player)).collect();
                let affiliation = PlayerAffiliation {
                    player: player.to_string(),
                    combined: flags.iter().any(|&flag| flag),
                    player_type: derive_player_type(&flags, tracked),
                    flags,
                };
                (player.to_string(), affiliation)
            })
            .collect();

        Self {
            tracked: tracked.to_vec(),
            players,
            unflagged: vec![false; tracked.len()],
            non_affiliated: PlayerType::NonAffiliated,
        }
    }

    /// The tracked titles, in flag order.
    #[must_use]
    pub fn tracked_titles(&self) -> &[String] {
        &self.tracked
    }

    /// Looks up one player's affiliation.
    #[must_use]
    pub fn get(&self, player: &str) -> Option<&PlayerAffiliation> {
        self.players.get(player)
    }

    /// Iterates over all players in ascending id order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerAffiliation> {
        self.players.values()
    }

    /// Number of players in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the table has no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player count per derived type label, sorted by label.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for affiliation in self.players.values() {
            *counts.entry(affiliation.player_type.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Pairs every event row with its player's flags.
    ///
    /// Left-join semantics: a player absent from this table (annotating a
    /// different dataset than the one the table was built from) gets
    /// all-false flags. The source table is not modified.
    #[must_use]
    pub fn annotate<'a>(&'a self, events: &'a EventTable) -> Vec<FlaggedEvent<'a>> {
        events
            .iter()
            .map(|event| match self.players.get(&event.player) {
                Some(affiliation) => FlaggedEvent {
                    event,
                    flags: &affiliation.flags,
                    combined: affiliation.combined,
                    player_type: &affiliation.player_type,
                },
                None => FlaggedEvent {
                    event,
                    flags: &self.unflagged,
                    combined: false,
                    player_type: &self.non_affiliated,
                },
            })
            .collect()
    }
}

fn derive_player_type(flags: &[bool], tracked: &[String]) -> PlayerType {
    let mut set = flags.iter().enumerate().filter(|&(_, &flag)| flag);
    match (set.next(), set.next()) {
        (None, _) => PlayerType::NonAffiliated,
        (Some((idx, _)), None) => PlayerType::Affiliated(tracked[idx].clone()),
        (Some(_), Some(_)) => PlayerType::MultiAffiliated,
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

    fn tracked() -> Vec<String> {
        vec!["MapleStory".into(), "Mabinogi".into(), "Vindictus".into()]
    }

    fn sample_table() -> EventTable {
        EventTable::new(vec![
            // p1 plays exactly one tracked title
            event("p1", "MapleStory", Action::Play, 12.0),
            event("p1", "Counter-Strike", Action::Play, 80.0),
            // p2 plays two tracked titles
            event("p2", "Mabinogi", Action::Play, 3.0),
            event("p2", "Vindictus", Action::Play, 9.0),
            // p3 only purchased a tracked title
            event("p3", "MapleStory", Action::Purchase, 1.0),
            // p4 is active elsewhere only
            event("p4", "Dota 2", Action::Play, 200.0),
        ])
    }

    #[test]
    fn test_flags_follow_play_membership() {
        let table = AffiliationTable::from_events(&sample_table(), &tracked());
        assert_eq!(table.get("p1").unwrap().flags, vec![true, false, false]);
        assert_eq!(table.get("p2").unwrap().flags, vec![false, true, true]);
        assert_eq!(table.get("p3").unwrap().flags, vec![false, false, false]);
        assert_eq!(table.get("p4").unwrap().flags, vec![false, false, false]);
    }

    #[test]
    fn test_combined_is_or_of_flags() {
        let table = AffiliationTable::from_events(&sample_table(), &tracked());
        for affiliation in table.players() {
            assert_eq!(
                affiliation.combined,
                affiliation.flags.iter().any(|&flag| flag)
            );
        }
    }

    #[test]
    fn test_player_type_partition() {
        let table = AffiliationTable::from_events(&sample_table(), &tracked());
        assert_eq!(
            table.get("p1").unwrap().player_type,
            PlayerType::Affiliated("MapleStory".into())
        );
        assert_eq!(
            table.get("p2").unwrap().player_type,
            PlayerType::MultiAffiliated
        );
        assert_eq!(
            table.get("p3").unwrap().player_type,
            PlayerType::NonAffiliated
        );
        assert_eq!(
            table.get("p4").unwrap().player_type,
            PlayerType::NonAffiliated
        );
    }

    #[test]
    fn test_purchase_only_contact_sets_no_flag() {
        let table = AffiliationTable::from_events(&sample_table(), &tracked());
        let p3 = table.get("p3").unwrap();
        assert!(!p3.combined);
        assert_eq!(p3.player_type, PlayerType::NonAffiliated);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(PlayerType::NonAffiliated.to_string(), "non_affiliated");
        assert_eq!(
            PlayerType::Affiliated("Mabinogi".into()).to_string(),
            "Mabinogi"
        );
        assert_eq!(PlayerType::MultiAffiliated.to_string(), "affiliated_multi");
    }

    #[test]
    fn test_annotate_covers_every_row() {
        let events = sample_table();
        let table = AffiliationTable::from_events(&events, &tracked());
        let flagged = table.annotate(&events);
        assert_eq!(flagged.len(), events.len());
        // p1's play row on a tracked title carries p1's flags.
        assert_eq!(flagged[0].flags, &[true, false, false]);
        assert!(flagged[0].combined);
    }

    #[test]
    fn test_annotate_unknown_player_gets_all_false() {
        let table = AffiliationTable::from_events(&EventTable::default(), &tracked());
        let other = EventTable::new(vec![event("p9", "MapleStory", Action::Play, 1.0)]);
        let flagged = table.annotate(&other);
        assert_eq!(flagged[0].flags, &[false, false, false]);
        assert_eq!(*flagged[0].player_type, PlayerType::NonAffiliated);
    }

    #[test]
    fn test_type_counts() {
        let table = AffiliationTable::from_events(&sample_table(), &tracked());
        let counts = table.type_counts();
        assert_eq!(counts["MapleStory"], 1);
        assert_eq!(counts["affiliated_multi"], 1);
        assert_eq!(counts["non_affiliated"], 2);
    }

    #[test]
    fn test_empty_table() {
        let table = AffiliationTable::from_events(&EventTable::default(), &tracked());
        assert!(table.is_empty());
        assert!(table.type_counts().is_empty());
    }
}
