//! K-mer counting engine: sequence splitting, 2-bit codecs, the three
//! counter representations, label merging and standardization.

pub mod codec;
pub mod dense;
pub mod merge;
pub mod sparse;
pub mod split;
pub mod standardize;
pub mod wide;

pub use codec::{decode_kmer, decode_wide_kmer, reverse_complement};
pub use dense::DenseCounter;
pub use sparse::SparseCounter;
pub use wide::WideSparseCounter;

use ndarray::Array1;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

use crate::error::SynkmerError;
use crate::io::fasta::read_fasta;

/// Largest K counted against a full 4^K dense table.
pub const MAX_K_DENSE: usize = 10;
/// Largest K representable in one 64-bit code word.
pub const MAX_K_SINGLE: usize = 31;
/// Largest K representable at all (128-bit code words).
pub const MAX_K_WIDE: usize = 63;

pub(crate) fn validate_k(k: usize) -> Result<(), SynkmerError> {
    if k == 0 || k > MAX_K_WIDE {
        return Err(SynkmerError::Configuration(format!(
            "k-mer length must be within 1..={MAX_K_WIDE}, got {k}"
        )));
    }
    Ok(())
}

/// The observed k-mer labels of a counter; wide counters carry 128-bit
/// codes.
pub enum Labels<'a> {
    Single(&'a [u64]),
    Wide(&'a [u128]),
}

impl Labels<'_> {
    pub fn len(&self) -> usize {
        match self {
            Labels::Single(l) => l.len(),
            Labels::Wide(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the label at `index` back to its nucleotide string.
    pub fn decode(&self, index: usize, k: usize) -> String {
        match self {
            Labels::Single(l) => decode_kmer(l[index], k),
            Labels::Wide(l) => decode_wide_kmer(l[index], k),
        }
    }
}

/// The three counter representations, selected by K at runtime.
pub enum KmerCounter {
    Dense(DenseCounter),
    Sparse(SparseCounter),
    Wide(WideSparseCounter),
}

impl KmerCounter {
    /// Picks the representation for `k`: dense up to 10, single-word sparse
    /// up to 31, 128-bit sparse up to 63.
    pub fn for_k(k: usize, canonical: bool) -> Result<Self, SynkmerError> {
        validate_k(k)?;
        if k <= MAX_K_DENSE {
            Ok(KmerCounter::Dense(DenseCounter::new(k, canonical)?))
        } else if k <= MAX_K_SINGLE {
            Ok(KmerCounter::Sparse(SparseCounter::new(k, canonical)?))
        } else {
            Ok(KmerCounter::Wide(WideSparseCounter::new(k, canonical)?))
        }
    }

    /// Accumulates the k-mer observations of one sequence.
    pub fn count(&mut self, seq: &[u8]) -> Result<(), SynkmerError> {
        match self {
            KmerCounter::Dense(c) => c.count(seq),
            KmerCounter::Sparse(c) => c.count(seq),
            KmerCounter::Wide(c) => c.count(seq),
        }
    }

    /// Re-aligns the counter onto `union_labels`, a sorted superset of its
    /// own labels. A no-op for dense counters, whose label space is already
    /// total; unsupported for wide codes.
    pub fn merge(&mut self, union_labels: &[u64]) -> Result<(), SynkmerError> {
        match self {
            KmerCounter::Dense(_) => Ok(()),
            KmerCounter::Sparse(c) => {
                c.reinsert(union_labels);
                Ok(())
            }
            KmerCounter::Wide(_) => Err(SynkmerError::Configuration(format!(
                "merging k-mer labels is only supported for k <= {MAX_K_SINGLE}"
            ))),
        }
    }

    pub fn counts(&self) -> &Array1<f64> {
        match self {
            KmerCounter::Dense(c) => c.counts(),
            KmerCounter::Sparse(c) => c.counts(),
            KmerCounter::Wide(c) => c.counts(),
        }
    }

    pub(crate) fn counts_mut(&mut self) -> &mut Array1<f64> {
        match self {
            KmerCounter::Dense(c) => c.counts_mut(),
            KmerCounter::Sparse(c) => c.counts_mut(),
            KmerCounter::Wide(c) => c.counts_mut(),
        }
    }

    pub fn labels(&self) -> Labels<'_> {
        match self {
            KmerCounter::Dense(c) => Labels::Single(c.labels()),
            KmerCounter::Sparse(c) => Labels::Single(c.labels()),
            KmerCounter::Wide(c) => Labels::Wide(c.labels()),
        }
    }

    /// Number of labelled entries in the count vector.
    pub fn size(&self) -> usize {
        match self {
            KmerCounter::Dense(c) => c.size(),
            KmerCounter::Sparse(c) => c.size(),
            KmerCounter::Wide(c) => c.size(),
        }
    }

    pub fn k(&self) -> usize {
        match self {
            KmerCounter::Dense(c) => c.k(),
            KmerCounter::Sparse(c) => c.k(),
            KmerCounter::Wide(c) => c.k(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        match self {
            KmerCounter::Dense(c) => c.is_canonical(),
            KmerCounter::Sparse(c) => c.is_canonical(),
            KmerCounter::Wide(c) => c.is_canonical(),
        }
    }

    pub fn degenerate_bases(&self) -> usize {
        match self {
            KmerCounter::Dense(c) => c.degenerate_bases(),
            KmerCounter::Sparse(c) => c.degenerate_bases(),
            KmerCounter::Wide(c) => c.degenerate_bases(),
        }
    }

    pub fn too_short_bases(&self) -> usize {
        match self {
            KmerCounter::Dense(c) => c.too_short_bases(),
            KmerCounter::Sparse(c) => c.too_short_bases(),
            KmerCounter::Wide(c) => c.too_short_bases(),
        }
    }

    pub fn skipped_bases(&self) -> usize {
        self.degenerate_bases() + self.too_short_bases()
    }
}

/// A collection of per-sample counters sharing one configuration.
pub struct KmerSet {
    k: usize,
    canonical: bool,
    counters: Vec<KmerCounter>,
    names: Vec<String>,
    standardized: bool,
}

impl KmerSet {
    pub fn new(k: usize, canonical: bool) -> Result<Self, SynkmerError> {
        validate_k(k)?;
        Ok(KmerSet {
            k,
            canonical,
            counters: Vec::new(),
            names: Vec::new(),
            standardized: false,
        })
    }

    /// Counts one named sample from raw sequences.
    pub fn add_sample(&mut self, name: &str, seqs: &[Vec<u8>]) -> Result<(), SynkmerError> {
        if seqs.is_empty() {
            return Err(SynkmerError::Input(format!(
                "sample '{name}' holds no sequences"
            )));
        }
        let mut counter = KmerCounter::for_k(self.k, self.canonical)?;
        for seq in seqs {
            counter.count(seq)?;
        }
        self.names.push(name.to_string());
        self.counters.push(counter);
        Ok(())
    }

    /// Counts one sample per FASTA file, fanning the files out over the
    /// thread pool. Sample order follows the input order.
    pub fn load_fasta_files(&mut self, paths: &[String]) -> Result<(), SynkmerError> {
        let k = self.k;
        let canonical = self.canonical;
        let built: Result<Vec<_>, SynkmerError> = paths
            .par_iter()
            .map(|path| {
                let records = read_fasta(path)?;
                if records.is_empty() {
                    return Err(SynkmerError::Input(format!(
                        "no sequence records in {path}"
                    )));
                }
                let mut counter = KmerCounter::for_k(k, canonical)?;
                for record in &records {
                    counter.count(&record.seq)?;
                }
                Ok((sample_name(path), counter))
            })
            .collect();
        for (name, counter) in built? {
            info!(
                "sample {}: {} distinct k-mers, {} degenerate and {} too-short bases skipped",
                name,
                counter.size(),
                counter.degenerate_bases(),
                counter.too_short_bases()
            );
            self.names.push(name);
            self.counters.push(counter);
        }
        Ok(())
    }

    /// Aligns all sparse counters onto the shared label union.
    pub fn merge(&mut self) -> Result<(), SynkmerError> {
        let mut refs: Vec<&mut KmerCounter> = self.counters.iter_mut().collect();
        merge::merge_counters(&mut refs)
    }

    /// Standardizes every counter's counts to z-scores.
    pub fn standardize(&mut self) {
        for counter in &mut self.counters {
            standardize::standardize(counter.counts_mut());
        }
        self.standardized = true;
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    pub fn is_standardized(&self) -> bool {
        self.standardized
    }

    pub fn counters(&self) -> &[KmerCounter] {
        &self.counters
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Sample label from a file path: base name with one extension stripped
/// (`sample.fasta.gz` stays `sample.fasta`).
fn sample_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
