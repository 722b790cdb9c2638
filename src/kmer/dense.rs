use ndarray::Array1;

use crate::error::SynkmerError;
use crate::kmer::codec::KmerCodec;
use crate::kmer::split::split_sequence;
use crate::kmer::MAX_K_DENSE;

/// Counter over the full code space [0, 4^K); only viable for small K.
/// Labels are the identity and never need merging.
pub struct DenseCounter {
    codec: KmerCodec,
    labels: Vec<u64>,
    counts: Array1<f64>,
    degenerate: usize,
    too_short: usize,
}

impl DenseCounter {
    pub fn new(k: usize, canonical: bool) -> Result<Self, SynkmerError> {
        if k == 0 || k > MAX_K_DENSE {
            return Err(SynkmerError::Configuration(format!(
                "dense counting supports k-mer lengths 1..={MAX_K_DENSE}, got {k}"
            )));
        }
        let n = 4usize.pow(k as u32);
        Ok(DenseCounter {
            codec: KmerCodec::new(k, canonical)?,
            labels: (0..n as u64).collect(),
            counts: Array1::zeros(n),
            degenerate: 0,
            too_short: 0,
        })
    }

    /// Splits `seq` and accumulates one observation per window code.
    pub fn count(&mut self, seq: &[u8]) -> Result<(), SynkmerError> {
        let split = split_sequence(seq, self.codec.k())?;
        self.degenerate += split.degenerate;
        self.too_short += split.too_short;
        let counts = &mut self.counts;
        for run in &split.runs {
            self.codec
                .for_each_code(run, |code| counts[code as usize] += 1.0);
        }
        Ok(())
    }

    pub fn k(&self) -> usize {
        self.codec.k()
    }

    pub fn is_canonical(&self) -> bool {
        self.codec.is_canonical()
    }

    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    pub fn counts(&self) -> &Array1<f64> {
        &self.counts
    }

    pub(crate) fn counts_mut(&mut self) -> &mut Array1<f64> {
        &mut self.counts
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn degenerate_bases(&self) -> usize {
        self.degenerate
    }

    pub fn too_short_bases(&self) -> usize {
        self.too_short
    }
}
