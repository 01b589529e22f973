use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Interaction type recorded on an event row.
///
/// The wire format uses the lowercase strings `"play"` and `"purchase"`,
/// both in CSV exports and in JSON datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The player spent time in the game; `value` holds hours played.
    Play,
    /// The player bought the game; `value` holds purchase units.
    Purchase,
}

impl Action {
    /// The wire representation of this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Purchase => "purchase",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action string.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown action '{value}' (expected 'play' or 'purchase')")]
pub struct ParseActionError {
    /// The string that failed to parse.
    pub value: String,
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "purchase" => Ok(Self::Purchase),
            _ => Err(ParseActionError {
                value: s.to_string(),
            }),
        }
    }
}

/// One row of the interaction log.
///
/// Events are immutable once loaded; analysis stages clone what they need
/// into derived tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    /// Player identifier.
    pub player: String,
    /// Game title as it appears in the log.
    pub game: String,
    /// What the player did.
    pub action: Action,
    /// Hours played or purchase units, depending on `action`.
    pub value: f64,
}
