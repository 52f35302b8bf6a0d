//! Slot statistics helpers

/// Weighted mean of the index over a histogram of counts
///
/// Computes `Σ(i * counts[i]) / Σcounts[i]`. Returns `0.0` for an all-empty
/// histogram instead of propagating a NaN.
///
/// # Example
/// ```
/// use bean_machine_core_rs::core::stats::weighted_index_mean;
///
/// let mean = weighted_index_mean(&[2, 0, 1]);
/// assert!((mean - 2.0 / 3.0).abs() < 1e-9);
/// assert_eq!(weighted_index_mean(&[0, 0]), 0.0);
/// ```
pub fn weighted_index_mean(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let weighted: usize = counts.iter().enumerate().map(|(i, c)| i * c).sum();
    weighted as f64 / total as f64
}
