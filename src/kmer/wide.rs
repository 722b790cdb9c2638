use std::cmp::Ordering;

use ndarray::Array1;

use crate::error::SynkmerError;
use crate::kmer::codec::WideKmerCodec;
use crate::kmer::split::split_sequence;
use crate::kmer::MAX_K_SINGLE;

/// Sparse counter for K beyond the single-word range, carried in 128-bit
/// code words. Same sort/collapse algorithm as [`super::SparseCounter`],
/// with the wider ordering everywhere codes are compared.
pub struct WideSparseCounter {
    codec: WideKmerCodec,
    labels: Vec<u128>,
    counts: Array1<f64>,
    degenerate: usize,
    too_short: usize,
}

impl WideSparseCounter {
    pub fn new(k: usize, canonical: bool) -> Result<Self, SynkmerError> {
        if k <= MAX_K_SINGLE {
            return Err(SynkmerError::Configuration(format!(
                "k-mer length {k} fits a single word; use the sparse counter"
            )));
        }
        Ok(WideSparseCounter {
            codec: WideKmerCodec::new(k, canonical)?,
            labels: Vec::new(),
            counts: Array1::zeros(0),
            degenerate: 0,
            too_short: 0,
        })
    }

    pub fn count(&mut self, seq: &[u8]) -> Result<(), SynkmerError> {
        let split = split_sequence(seq, self.codec.k())?;
        self.degenerate += split.degenerate;
        self.too_short += split.too_short;

        let mut codes = Vec::new();
        for run in &split.runs {
            self.codec.for_each_code(run, |c| codes.push(c));
        }
        codes.sort_unstable();

        let mut labels = Vec::new();
        let mut counts = Vec::new();
        let mut i = 0;
        while i < codes.len() {
            let code = codes[i];
            let mut n = 1;
            while i + n < codes.len() && codes[i + n] == code {
                n += 1;
            }
            labels.push(code);
            counts.push(n as f64);
            i += n;
        }

        self.absorb(labels, counts);
        Ok(())
    }

    fn absorb(&mut self, labels: Vec<u128>, counts: Vec<f64>) {
        if self.labels.is_empty() {
            self.labels = labels;
            self.counts = Array1::from(counts);
            return;
        }
        let mut out_labels = Vec::with_capacity(self.labels.len() + labels.len());
        let mut out_counts = Vec::with_capacity(self.labels.len() + labels.len());
        let mut i = 0;
        let mut j = 0;
        while i < self.labels.len() && j < labels.len() {
            match self.labels[i].cmp(&labels[j]) {
                Ordering::Less => {
                    out_labels.push(self.labels[i]);
                    out_counts.push(self.counts[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out_labels.push(labels[j]);
                    out_counts.push(counts[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out_labels.push(self.labels[i]);
                    out_counts.push(self.counts[i] + counts[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        while i < self.labels.len() {
            out_labels.push(self.labels[i]);
            out_counts.push(self.counts[i]);
            i += 1;
        }
        while j < labels.len() {
            out_labels.push(labels[j]);
            out_counts.push(counts[j]);
            j += 1;
        }
        self.labels = out_labels;
        self.counts = Array1::from(out_counts);
    }

    pub fn k(&self) -> usize {
        self.codec.k()
    }

    pub fn is_canonical(&self) -> bool {
        self.codec.is_canonical()
    }

    pub fn labels(&self) -> &[u128] {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::codec::decode_wide_kmer;

    #[test]
    fn test_wide_counting_over_40mers() {
        let seq = b"ACGTACGTACGTACGTACGTTGCATGCATGCATGCATGCAACG";
        let mut counter = WideSparseCounter::new(40, false).unwrap();
        counter.count(seq).unwrap();
        assert_eq!(counter.size(), 4);
        let total: f64 = counter.counts().sum();
        assert_eq!(total, 4.0);
        assert!(counter.labels().windows(2).all(|w| w[0] < w[1]));
        for (i, &code) in counter.labels().iter().enumerate() {
            let kmer = decode_wide_kmer(code, 40);
            assert!(seq
                .windows(40)
                .any(|w| w == kmer.as_bytes()), "label {i} decodes to a window");
        }
    }

    #[test]
    fn test_single_word_k_rejected() {
        assert!(WideSparseCounter::new(31, false).is_err());
    }
}
