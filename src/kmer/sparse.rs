use std::cmp::Ordering;

use ndarray::Array1;

use crate::error::SynkmerError;
use crate::kmer::codec::KmerCodec;
use crate::kmer::split::split_sequence;

/// Counter holding sorted (code, count) pairs over observed k-mers only,
/// for K up to the single-word range.
pub struct SparseCounter {
    codec: KmerCodec,
    labels: Vec<u64>,
    counts: Array1<f64>,
    degenerate: usize,
    too_short: usize,
}

impl SparseCounter {
    pub fn new(k: usize, canonical: bool) -> Result<Self, SynkmerError> {
        Ok(SparseCounter {
            codec: KmerCodec::new(k, canonical)?,
            labels: Vec::new(),
            counts: Array1::zeros(0),
            degenerate: 0,
            too_short: 0,
        })
    }

    /// Splits `seq`, buffers every window code, sorts the buffer,
    /// run-length-collapses it and folds the result into the accumulated
    /// (code, count) list.
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

    /// Sum-merges a sorted, deduplicated (code, count) list into the
    /// accumulated one; both stay sorted and unique.
    fn absorb(&mut self, labels: Vec<u64>, counts: Vec<f64>) {
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

    /// Re-derives the (code, count) list over `union`, which must be a
    /// sorted superset of the counter's own labels; absent codes get a
    /// zero count.
    pub(crate) fn reinsert(&mut self, union: &[u64]) {
        let mut out_counts = Vec::with_capacity(union.len());
        let mut i = 0;
        for &code in union {
            if i < self.labels.len() && self.labels[i] == code {
                out_counts.push(self.counts[i]);
                i += 1;
            } else {
                out_counts.push(0.0);
            }
        }
        self.labels = union.to_vec();
        self.counts = Array1::from(out_counts);
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
