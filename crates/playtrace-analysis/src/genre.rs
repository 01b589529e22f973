//! Game→genre reference catalog and the genre join.
//!
//! The catalog is configuration data, not code: it ships as a JSON object
//! next to the dataset (`{"Counter-Strike": "FPS", ...}`) and must cover
//! every title the deployment cares about. Titles missing from the catalog
//! are dropped by the join; the drop is tallied and logged rather than
//! silent (missing coverage is a data-quality problem, not a success).

use std::{collections::BTreeMap, fmt, io::Read};

use playtrace_events::{Action, EventTable};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Number of genres in the fixed category set.
pub const GENRE_COUNT: usize = 5;

/// Fixed game-category set used to bucket play and purchase activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Genre {
    #[serde(rename = "FPS")]
    Fps,
    #[serde(rename = "MMORPG")]
    Mmorpg,
    #[serde(rename = "MOBA")]
    Moba,
    #[serde(rename = "Sports")]
    Sports,
    #[serde(rename = "Indie")]
    Indie,
}

impl Genre {
    /// Every genre, in column order.
    pub const ALL: [Self; GENRE_COUNT] =
        [Self::Fps, Self::Mmorpg, Self::Moba, Self::Sports, Self::Indie];

    /// Human-readable name; also the catalog file representation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fps => "FPS",
            Self::Mmorpg => "MMORPG",
            Self::Moba => "MOBA",
            Self::Sports => "Sports",
            Self::Indie => "Indie",
        }
    }

    /// Short key used in feature column names (`pt_fps`, `ppr_mmo`, ...).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Fps => "fps",
            Self::Mmorpg => "mmo",
            Self::Moba => "moba",
            Self::Sports => "sports",
            Self::Indie => "indie",
        }
    }

    /// Position of this genre in [`Genre::ALL`] and in feature arrays.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External game-title → genre reference table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GenreCatalog {
    map: BTreeMap<String, Genre>,
}

/// An event row with its genre attached (output of the catalog join).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreEvent {
    /// Player identifier.
    pub player: String,
    /// Game title.
    pub game: String,
    /// Genre looked up from the catalog.
    pub genre: Genre,
    /// What the player did.
    pub action: Action,
    /// Hours played or purchase units.
    pub value: f64,
}

/// Result of joining genres onto an event table.
///
/// The join is inner: rows whose title has no catalog entry are absent
/// from `events` and tallied per title in `dropped`.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedEvents {
    /// Surviving rows, in source order.
    pub events: Vec<GenreEvent>,
    /// Dropped-row count per uncovered title, sorted by title.
    pub dropped: BTreeMap<String, usize>,
}

impl AnnotatedEvents {
    /// Total number of rows dropped by the join.
    #[must_use]
    pub fn dropped_rows(&self) -> usize {
        self.dropped.values().sum()
    }
}

impl GenreCatalog {
    /// Wraps an explicit title→genre map.
    #[must_use]
    pub fn new(map: BTreeMap<String, Genre>) -> Self {
        Self { map }
    }

    /// Reads a catalog from a JSON object of `"title": "Genre"` pairs.
    pub fn from_reader<R>(reader: R) -> Result<Self, serde_json::Error>
    where
        R: Read,
    {
        serde_json::from_reader(reader)
    }

    /// Deterministic placeholder catalog for tests and dry runs.
    ///
    /// Assigns every title a pseudo-random genre from a seeded generator.
    /// The assignment carries no signal; never feed it to real feature
    /// generation.
    #[must_use]
    pub fn stub<I, S>(titles: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        log::warn!("using stub genre catalog (seed {seed}); assignments are placeholder data");
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = titles
            .into_iter()
            .map(|title| (title.into(), Genre::ALL[rng.random_range(0..GENRE_COUNT)]))
            .collect();
        Self { map }
    }

    /// Looks up the genre for a title.
    #[must_use]
    pub fn get(&self, game: &str) -> Option<Genre> {
        self.map.get(game).copied()
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over `(title, genre)` entries, sorted by title.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Genre)> {
        self.map.iter().map(|(title, genre)| (title.as_str(), *genre))
    }

    /// Joins genres onto every event row (inner join).
    ///
    /// Rows whose title is not in the catalog are dropped and tallied in
    /// the result; one warning is logged per uncovered title.
    #[must_use]
    pub fn annotate(&self, events: &EventTable) -> AnnotatedEvents {
        let mut annotated = AnnotatedEvents::default();
        for event in events {
            if let Some(genre) = self.get(&event.game) {
                annotated.events.push(GenreEvent {
                    player: event.player.clone(),
                    game: event.game.clone(),
                    genre,
                    action: event.action,
                    value: event.value,
                });
            } else {
                *annotated.dropped.entry(event.game.clone()).or_insert(0) += 1;
            }
        }
        for (title, count) in &annotated.dropped {
            log::warn!("no genre mapping for '{title}': dropped {count} rows");
        }
        annotated
    }
}
