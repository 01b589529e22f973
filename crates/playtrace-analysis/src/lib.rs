//! Exploratory analysis and feature engineering over interaction logs.
//!
//! This crate turns a raw [`playtrace_events::EventTable`] into the
//! derived tables a downstream model consumes:
//!
//! 1. **Describe** ([`report::DatasetReport`]): dataset-level counts and
//!    descriptive statistics, rendered as a text report
//! 2. **Classify** ([`affiliation::AffiliationTable`]): per-player boolean
//!    flags for a configured list of tracked titles, collapsed into a
//!    categorical player type
//! 3. **Annotate** ([`genre::GenreCatalog`]): join an external game→genre
//!    reference table onto every event row
//! 4. **Featurize** ([`features::FeatureMatrix`]): aggregate the annotated
//!    rows into one fixed-width numeric vector per player
//!
//! Stage 1 is independent; stages 2 and 3 both read the raw table; stage 4
//! requires stage 3's output.
//!
//! # Examples
//!
//! ```
//! use playtrace_analysis::{features::FeatureMatrix, genre::GenreCatalog};
//! use playtrace_events::{Action, Event, EventTable};
//!
//! let table = EventTable::new(vec![Event {
//!     player: "p1".into(),
//!     game: "Counter-Strike".into(),
//!     action: Action::Play,
//!     value: 6.5,
//! }]);
//!
//! let catalog: GenreCatalog =
//!     serde_json::from_str(r#"{"Counter-Strike": "FPS"}"#).unwrap();
//! let annotated = catalog.annotate(&table);
//! let matrix = FeatureMatrix::from_annotated(&annotated.events);
//! assert_eq!(matrix.len(), 1);
//! ```

pub mod affiliation;
pub mod features;
pub mod frequency;
pub mod genre;
pub mod report;
