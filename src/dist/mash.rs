use ndarray::Array1;

/// Guards the logarithm when the Jaccard index is exactly zero.
const EPSILON: f64 = 1e-7;

/// Mash distance from the Jaccard index of the two vectors' nonzero
/// supports: `-(1/k) * ln(2J/(1+J) + epsilon)`, `k` being the configured
/// k-mer length. An empty union yields J = 0.
pub fn distance(a: &Array1<f64>, b: &Array1<f64>, k: usize) -> f64 {
    let mut intersection = 0usize;
    let mut union = 0usize;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let in_a = x != 0.0;
        let in_b = y != 0.0;
        if in_a && in_b {
            intersection += 1;
        }
        if in_a || in_b {
            union += 1;
        }
    }
    let j = if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    };
    -(1.0 / k as f64) * ((2.0 * j / (1.0 + j)) + EPSILON).ln()
}
