//! Pairwise distance metrics over aligned k-mer count vectors.

pub mod cosine;
pub mod euclidean;
pub mod mash;

use ndarray::Array1;

use crate::error::SynkmerError;

/// The supported distance metrics, selected by name at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    Euclidean,
    Cosine,
    Mash { k: usize },
}

impl DistanceMetric {
    /// Resolves a metric name; `k` is the configured k-mer length the Mash
    /// formula needs.
    pub fn from_name(name: &str, k: usize) -> Result<Self, SynkmerError> {
        match name {
            "Euclidean" => Ok(DistanceMetric::Euclidean),
            "Cosine" => Ok(DistanceMetric::Cosine),
            "Mash" => Ok(DistanceMetric::Mash { k }),
            other => Err(SynkmerError::Configuration(format!(
                "unknown distance method '{other}' (expected Euclidean, Cosine or Mash)"
            ))),
        }
    }

    /// Distance between two aligned count vectors; errors when the vectors
    /// differ in length.
    pub fn compute(&self, a: &Array1<f64>, b: &Array1<f64>) -> Result<f64, SynkmerError> {
        if a.len() != b.len() {
            return Err(SynkmerError::Alignment {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(match self {
            DistanceMetric::Euclidean => euclidean::distance(a, b),
            DistanceMetric::Cosine => cosine::distance(a, b),
            DistanceMetric::Mash { k } => mash::distance(a, b, *k),
        })
    }

    /// Whether i == i pairs carry information for this metric.
    pub fn needs_self_comparison(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_unknown_method_rejected() {
        assert!(matches!(
            DistanceMetric::from_name("Manhattan", 4),
            Err(SynkmerError::Configuration(_))
        ));
        // Names are matched exactly.
        assert!(DistanceMetric::from_name("euclidean", 4).is_err());
    }

    #[test]
    fn test_length_mismatch_is_alignment_error() {
        let metric = DistanceMetric::Euclidean;
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            metric.compute(&a, &b),
            Err(SynkmerError::Alignment { left: 2, right: 3 })
        ));
    }
}
