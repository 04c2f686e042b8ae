/// Descriptive statistics summarizing a sample of scores.
#[derive(Debug, Clone)]
pub struct ScoreStats {
    /// The minimum value in the sample.
    pub min: f32,
    /// The maximum value in the sample.
    pub max: f32,
    /// The arithmetic mean of the sample.
    pub mean: f32,
    /// The standard deviation of the sample.
    pub std_dev: f32,
}

impl ScoreStats {
    /// Computes descriptive statistics over a sample.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f32` values
    ///
    /// # Returns
    ///
    /// * `Some(ScoreStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use canbot_stats::descriptive::ScoreStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = ScoreStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();

        let min = values.iter().copied().reduce(f32::min)?;
        let max = values.iter().copied().reduce(f32::max)?;
        let n = values.len() as f32;
        let mean = values.iter().copied().sum::<f32>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            std_dev,
        })
    }
}
