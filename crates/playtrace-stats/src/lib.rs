//! Statistical summaries for the playtrace analysis pipeline.
//!
//! This crate provides the numeric building blocks used by the dataset
//! report and the feature generator:
//!
//! - **Descriptive summaries**: count, mean, sample standard deviation,
//!   minimum, quartiles, and maximum of a dataset
//! - **Quantiles**: linear-interpolation quantile computation
//! - **Histograms**: frequency distributions with quantile-clipped binning
//!
//! # Modules
//!
//! - [`descriptive`]: Five-number-plus summaries for datasets
//! - [`quantiles`]: Quantile computation on sorted data
//! - [`histogram`]: Histogram construction for visualizing distributions
//!
//! # Examples
//!
//! ## Computing a summary
//!
//! ```
//! use playtrace_stats::descriptive::Summary;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let summary = Summary::new(values).unwrap();
//! assert_eq!(summary.mean, 3.0);
//! assert_eq!(summary.median, 3.0);
//! ```
//!
//! ## Computing a quantile
//!
//! ```
//! use playtrace_stats::quantiles::compute_quantile;
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(compute_quantile(&values, 0.5), 2.5);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod quantiles;
