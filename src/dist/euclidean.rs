use ndarray::Array1;

/// L2 norm of the elementwise difference.
pub fn distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let diff = a - b;
    diff.dot(&diff).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_known_distance() {
        let a = arr1(&[1.0, 0.0, 0.0, 0.0]);
        let b = arr1(&[0.0, 1.0, 0.0, 0.0]);
        assert!((distance(&a, &b) - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_identity() {
        let a = arr1(&[3.0, 1.0, 4.0]);
        assert_eq!(distance(&a, &a), 0.0);
    }
}
