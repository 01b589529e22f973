use crate::quantiles;

/// Descriptive summary of a dataset.
///
/// This structure mirrors the familiar tabular `describe()` block: count,
/// mean, sample standard deviation, minimum, quartiles, and maximum.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Number of values in the dataset.
    pub count: usize,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator). Zero for a
    /// single-value dataset.
    pub std_dev: f64,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The first quartile (25th percentile).
    pub q1: f64,
    /// The median value (50th percentile).
    pub median: f64,
    /// The third quartile (75th percentile).
    pub q3: f64,
    /// The maximum value in the dataset.
    pub max: f64,
}

impl Summary {
    /// Computes a summary from unsorted values.
    ///
    /// This method will sort the values internally before computing
    /// statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. The values will be
    ///   collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(Summary)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use playtrace_stats::descriptive::Summary;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let summary = Summary::new(values).unwrap();
    /// assert_eq!(summary.count, 5);
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 5.0);
    /// assert_eq!(summary.mean, 3.0);
    /// assert_eq!(summary.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes a summary from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step. Use this
    /// when you already have sorted data to avoid unnecessary work.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    ///
    /// # Returns
    ///
    /// * `Some(Summary)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use playtrace_stats::descriptive::Summary;
    /// let mut values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// values.sort_by(f64::total_cmp);
    /// let summary = Summary::from_sorted(&values).unwrap();
    /// assert_eq!(summary.q1, 2.0);
    /// assert_eq!(summary.q3, 4.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().copied().sum::<f64>() / n;
        // Sample standard deviation; a single observation has no spread.
        let std_dev = if count > 1 {
            let sum_sq = sorted_values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let (q1, median, q3) = quantiles::quartiles(sorted_values);

        Some(Self {
            count,
            mean,
            std_dev,
            min,
            q1,
            median,
            q3,
            max,
        })
    }
}
