//! Core data model for player/game interaction logs.
//!
//! An interaction log is a flat table of [`Event`] rows: a player acted on
//! a game (`play` or `purchase`) with an associated numeric value (hours
//! played, purchase units). The [`EventTable`] is the immutable
//! source-of-truth every analysis stage reads from; derived tables are
//! always new allocations, the source is never mutated in place.
//!
//! # Loading
//!
//! Two loaders are provided:
//!
//! - [`load::load_events_csv`]: headerless CSV rows
//!   (`player,game,action,value[,...]`), the format raw event exports
//!   ship in
//! - [`load::load_events_json`]: a JSON array of event objects
//!
//! Both fail fast on malformed rows with an error naming the offending
//! record and column.
//!
//! # Examples
//!
//! ```
//! use playtrace_events::{Action, Event, EventTable};
//!
//! let table = EventTable::new(vec![
//!     Event {
//!         player: "p1".into(),
//!         game: "Vindictus".into(),
//!         action: Action::Play,
//!         value: 12.5,
//!     },
//! ]);
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.distinct_players().len(), 1);
//! ```

pub mod event;
pub mod load;
pub mod table;

pub use self::{
    event::{Action, Event, ParseActionError},
    load::{LoadError, load_events_csv, load_events_json, read_events_csv},
    table::EventTable,
};
