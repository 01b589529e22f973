use std::ops::Range;

use crate::quantiles;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into bins and counts the frequency
/// of values falling into each bin. Binning is quantile-clipped: the main
/// bins cover the P5-P95 range so that heavy-tailed data (such as play
/// time) does not flatten the visible distribution, while dedicated
/// underflow and overflow bins retain the tails.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram. May include underflow and
    /// overflow bins at the start and end to capture values outside the
    /// main range.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points
/// falling within that range.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start,
    /// exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// This method automatically sorts the input values before binning.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from
    /// * `num_bins` - The number of main bins (excluding underflow and
    ///   overflow bins)
    ///
    /// # Examples
    ///
    /// ```
    /// # use playtrace_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 5);
    /// let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
    /// assert_eq!(total, 10);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    /// * `num_bins` - The number of main bins (excluding underflow and
    ///   overflow bins)
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        if sorted_values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let hard_min = sorted_values[0];
        let hard_max = sorted_values[sorted_values.len() - 1];

        // Main bins cover P5-P95; the tails land in dedicated bins.
        let soft_min = quantiles::compute_quantile(sorted_values, 0.05);
        let mut width = (quantiles::compute_quantile(sorted_values, 0.95) - soft_min)
            / num_bins as f64;
        if width <= 0.0 {
            // Distribution concentrated at a single value.
            width = 1.0;
        }
        let soft_max = soft_min + width * num_bins as f64;

        let has_underflow = hard_min < soft_min;
        let has_overflow = hard_max > soft_max;

        let mut bins = vec![];
        if has_underflow {
            bins.push(HistogramBin {
                range: hard_min..soft_min,
                count: 0,
            });
        }
        for bin_idx in 0..num_bins {
            bins.push(HistogramBin {
                range: soft_min + bin_idx as f64 * width..soft_min + (bin_idx + 1) as f64 * width,
                count: 0,
            });
        }
        if has_overflow {
            bins.push(HistogramBin {
                range: soft_max..hard_max.next_up(),
                count: 0,
            });
        }

        for &value in sorted_values {
            let idx = if value < soft_min {
                0
            } else if value >= soft_max {
                if has_overflow {
                    num_bins + usize::from(has_underflow)
                } else {
                    // value == soft_max exactly; count it in the last main bin
                    num_bins - 1 + usize::from(has_underflow)
                }
            } else {
                let offset = ((value - soft_min) / width).floor() as usize;
                offset.min(num_bins - 1) + usize::from(has_underflow)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        let histogram = Histogram::new(values, 10);
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_histogram_empty_input() {
        let histogram = Histogram::new([], 10);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_histogram_zero_bins() {
        let histogram = Histogram::new([1.0, 2.0], 0);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_histogram_single_value_dataset() {
        let histogram = Histogram::new([3.0, 3.0, 3.0], 4);
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
        // All values land in the first main bin.
        assert_eq!(histogram.bins[0].count, 3);
    }

    #[test]
    fn test_histogram_outliers_land_in_overflow_bin() {
        let mut values: Vec<f64> = (1..=99).map(f64::from).collect();
        values.push(10_000.0);
        let histogram = Histogram::new(values, 10);
        let last = histogram.bins.last().unwrap();
        assert!(last.range.contains(&10_000.0));
        assert!(last.count >= 1);
    }
}
