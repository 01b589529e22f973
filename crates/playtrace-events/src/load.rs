use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::ReaderBuilder;

use crate::{
    event::{Action, Event},
    table::EventTable,
};

/// Error produced while loading an event dataset.
///
/// Malformed rows fail the whole load; the loaders never skip rows
/// silently. Row-level variants carry the record number (1-based) and the
/// column that failed.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    /// Underlying I/O failure.
    #[display("failed to read dataset: {_0}")]
    #[from]
    Io(std::io::Error),
    /// Structural CSV failure (unbalanced quotes, bad encoding).
    #[display("malformed CSV: {_0}")]
    #[from]
    Csv(csv::Error),
    /// JSON dataset failed to parse.
    #[display("malformed JSON dataset: {_0}")]
    #[from]
    Json(serde_json::Error),
    /// A record with fewer than the four required columns.
    #[display(
        "record {record}: expected columns player, game, action, value; found {found} fields"
    )]
    MissingColumns {
        /// 1-based record number.
        record: u64,
        /// Number of fields actually present.
        found: usize,
    },
    /// A record whose player or game column is empty.
    #[display("record {record}: column '{column}' is empty")]
    EmptyColumn {
        /// 1-based record number.
        record: u64,
        /// Name of the empty column.
        column: &'static str,
    },
    /// A record whose action column is not `play` or `purchase`.
    #[display("record {record}: column 'action' has unknown action '{value}'")]
    InvalidAction {
        /// 1-based record number.
        record: u64,
        /// The offending field content.
        value: String,
    },
    /// A record whose value column is not a number.
    #[display("record {record}: column 'value' has invalid number '{value}'")]
    InvalidValue {
        /// 1-based record number.
        record: u64,
        /// The offending field content.
        value: String,
    },
}

/// Loads a headerless CSV event log from a file.
///
/// Expected columns per record: `player,game,action,value`. Extra trailing
/// columns are ignored; raw event exports commonly carry a constant final
/// column.
pub fn load_events_csv<P>(path: P) -> Result<EventTable, LoadError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_events_csv(BufReader::new(file))
}

/// Reads a headerless CSV event log from any reader.
///
/// See [`load_events_csv`] for the expected format.
pub fn read_events_csv<R>(reader: R) -> Result<EventTable, LoadError>
where
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = vec![];
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let number = u64::try_from(idx + 1).unwrap_or(u64::MAX);
        if record.len() < 4 {
            return Err(LoadError::MissingColumns {
                record: number,
                found: record.len(),
            });
        }
        for (column, field) in [("player", &record[0]), ("game", &record[1])] {
            if field.is_empty() {
                return Err(LoadError::EmptyColumn {
                    record: number,
                    column,
                });
            }
        }
        let action = record[2]
            .parse::<Action>()
            .map_err(|e| LoadError::InvalidAction {
                record: number,
                value: e.value,
            })?;
        let value = record[3]
            .parse::<f64>()
            .map_err(|_| LoadError::InvalidValue {
                record: number,
                value: record[3].to_string(),
            })?;
        events.push(Event {
            player: record[0].to_string(),
            game: record[1].to_string(),
            action,
            value,
        });
    }
    Ok(EventTable::new(events))
}

/// Loads a JSON event dataset (an array of event objects) from a file.
pub fn load_events_json<P>(path: P) -> Result<EventTable, LoadError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let table = serde_json::from_reader(BufReader::new(file))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_basic() {
        let data = "\
151603712,The Elder Scrolls V Skyrim,purchase,1.0,0
151603712,The Elder Scrolls V Skyrim,play,273.0,0
";
        let table = read_events_csv(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let events = table.events();
        assert_eq!(events[0].action, Action::Purchase);
        assert_eq!(events[1].action, Action::Play);
        assert_eq!(events[1].value, 273.0);
    }

    #[test]
    fn test_read_csv_ignores_trailing_columns() {
        let data = "p1,GameA,play,2.5,0,extra";
        let table = read_events_csv(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.events()[0].game, "GameA");
    }

    #[test]
    fn test_read_csv_rejects_short_record() {
        let data = "p1,GameA,play";
        let err = read_events_csv(data.as_bytes()).unwrap_err();
        match err {
            LoadError::MissingColumns { record, found } => {
                assert_eq!(record, 1);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_unknown_action() {
        let data = "p1,GameA,uninstall,1.0";
        let err = read_events_csv(data.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidAction { record, value } => {
                assert_eq!(record, 1);
                assert_eq!(value, "uninstall");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_bad_value() {
        let data = "p1,GameA,play,lots";
        let err = read_events_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { record: 1, .. }));
    }

    #[test]
    fn test_read_csv_rejects_empty_player() {
        let data = ",GameA,play,1.0";
        let err = read_events_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::EmptyColumn {
                column: "player",
                ..
            }
        ));
    }

    #[test]
    fn test_read_csv_empty_input_is_empty_table() {
        let table = read_events_csv("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
