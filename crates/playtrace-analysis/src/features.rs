//! Per-player feature matrix from genre-annotated events.
//!
//! Each player collapses to 20 numeric fields: absolute play time and
//! purchase volume per genre, plus the proportional split of each across
//! genres. The proportions are what a similarity model consumes; the
//! absolute columns keep the magnitudes inspectable.

use std::collections::BTreeMap;

use playtrace_events::Action;
use serde::Serialize;

use crate::genre::{GENRE_COUNT, Genre, GenreEvent};

/// Feature vector for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerFeatures {
    /// Player identifier.
    pub player: String,
    /// Total play hours per genre (`pt_*` columns).
    pub play_time: [f64; GENRE_COUNT],
    /// Total purchase units per genre (`pr_*` columns).
    pub purchases: [f64; GENRE_COUNT],
    /// Share of play time per genre (`ppt_*` columns). All zeros for a
    /// player with no play time.
    pub play_share: [f64; GENRE_COUNT],
    /// Share of purchases per genre (`ppr_*` columns). All zeros for a
    /// player with no purchases.
    pub purchase_share: [f64; GENRE_COUNT],
}

impl PlayerFeatures {
    /// Feature values in column order (see
    /// [`FeatureMatrix::column_names`]).
    #[must_use]
    pub fn row(&self) -> Vec<f64> {
        self.play_time
            .iter()
            .chain(&self.purchases)
            .chain(&self.play_share)
            .chain(&self.purchase_share)
            .copied()
            .collect()
    }
}

/// Feature matrix: one row per player with at least one genre-annotated
/// event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FeatureMatrix {
    players: Vec<PlayerFeatures>,
}

impl FeatureMatrix {
    /// Aggregates genre-annotated events into per-player features.
    ///
    /// Play rows sum their value into the player's `play_time` bucket for
    /// the row's genre; purchase rows into `purchases`. Shares divide each
    /// bucket by the player's total; a zero total yields all-zero shares,
    /// never NaN. Rows come out in ascending player-id order. A player
    /// with no surviving annotated events has no row at all (not a
    /// zero-filled one).
    #[must_use]
    pub fn from_annotated(events: &[GenreEvent]) -> Self {
        let mut totals: BTreeMap<&str, ([f64; GENRE_COUNT], [f64; GENRE_COUNT])> = BTreeMap::new();
        for event in events {
            let entry = totals
                .entry(event.player.as_str())
                .or_insert(([0.0; GENRE_COUNT], [0.0; GENRE_COUNT]));
            let bucket = match event.action {
                Action::Play => &mut entry.0,
                Action::Purchase => &mut entry.1,
            };
            bucket[event.genre.index()] += event.value;
        }

        let players = totals
            .into_iter()
            .map(|(player, (play_time, purchases))| PlayerFeatures {
                player: player.to_string(),
                play_share: proportions(&play_time),
                purchase_share: proportions(&purchases),
                play_time,
                purchases,
            })
            .collect();

        Self { players }
    }

    /// All feature rows, in ascending player-id order.
    #[must_use]
    pub fn players(&self) -> &[PlayerFeatures] {
        &self.players
    }

    /// Looks up one player's features.
    #[must_use]
    pub fn get(&self, player: &str) -> Option<&PlayerFeatures> {
        self.players
            .binary_search_by(|features| features.player.as_str().cmp(player))
            .ok()
            .map(|idx| &self.players[idx])
    }

    /// Number of feature rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Column names in row order: `pt_<genre>`, `pr_<genre>`,
    /// `ppt_<genre>`, `ppr_<genre>`.
    #[must_use]
    pub fn column_names() -> Vec<String> {
        ["pt", "pr", "ppt", "ppr"]
            .iter()
            .flat_map(|prefix| {
                Genre::ALL
                    .iter()
                    .map(move |genre| format!("{prefix}_{}", genre.key()))
            })
            .collect()
    }
}

/// Row-wise proportions; all zeros when the row total is zero.
fn proportions(values: &[f64; GENRE_COUNT]) -> [f64; GENRE_COUNT] {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.map(|value| value / total)
    } else {
        [0.0; GENRE_COUNT]
    }
}
