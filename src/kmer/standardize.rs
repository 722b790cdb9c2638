use ndarray::Array1;
use statrs::statistics::Statistics;
use tracing::warn;

/// In-place z-score standardization: each value becomes (x - mean) / sd,
/// with the sample standard deviation. A vector with zero spread is left
/// unchanged rather than filled with non-finite values.
pub fn standardize(counts: &mut Array1<f64>) {
    if counts.len() < 2 {
        warn!("not enough values to standardize, leaving counts unchanged");
        return;
    }
    let mean = counts.iter().mean();
    let sd = counts.iter().std_dev();
    if sd == 0.0 || !sd.is_finite() {
        warn!("standard deviation is zero, leaving counts unstandardized");
        return;
    }
    counts.mapv_inplace(|x| (x - mean) / sd);
}
