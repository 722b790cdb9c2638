use ndarray::Array1;

/// Cosine distance `1 - a.b / (|a|*|b|)`. A zero vector has no direction;
/// pairs involving one are assigned the maximal distance 1.0.
pub fn distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - a.dot(b) / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_orthogonal_vectors() {
        let a = arr1(&[1.0, 0.0, 0.0, 0.0]);
        let b = arr1(&[0.0, 1.0, 0.0, 0.0]);
        assert!((distance(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_proportional_vectors() {
        let a = arr1(&[2.0, 1.0, 5.0]);
        let b = arr1(&[6.0, 3.0, 15.0]);
        assert!(distance(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_is_maximal() {
        let a = arr1(&[0.0, 0.0]);
        let b = arr1(&[1.0, 2.0]);
        assert_eq!(distance(&a, &b), 1.0);
    }
}
