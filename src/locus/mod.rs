//! Locus-centric pipeline: annotation loading, flanking-window extraction,
//! per-channel counting, label merging and all-pairs distance computation.

pub mod gff;
pub mod windows;

pub use gff::{load_gff, Locus};

use ahash::AHashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::dist::DistanceMetric;
use crate::error::SynkmerError;
use crate::kmer::merge::merge_counters;
use crate::kmer::{standardize, validate_k, KmerCounter, MAX_K_SINGLE};

/// One pairwise comparison; a channel without data on either side stays
/// `None` and is rendered as a missing-value marker downstream.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceRecord {
    pub a: String,
    pub b: String,
    pub upstream: Option<f64>,
    pub downstream: Option<f64>,
}

/// One counted flanking window of one locus.
struct Channel {
    seq: Vec<u8>,
    counter: KmerCounter,
}

/// All loci of a run with their upstream/downstream channels.
pub struct LocusSet {
    k: usize,
    canonical: bool,
    window: usize,
    loci: Vec<Locus>,
    upstream: Vec<Option<Channel>>,
    downstream: Vec<Option<Channel>>,
    standardized: bool,
}

impl LocusSet {
    pub fn new(k: usize, window: usize, canonical: bool) -> Result<Self, SynkmerError> {
        validate_k(k)?;
        if window == 0 {
            return Err(SynkmerError::Configuration(
                "window length must be positive".to_string(),
            ));
        }
        Ok(LocusSet {
            k,
            canonical,
            window,
            loci: Vec::new(),
            upstream: Vec::new(),
            downstream: Vec::new(),
            standardized: false,
        })
    }

    pub fn load_gff(&mut self, path: &str, feature: &str, id_key: &str) -> Result<(), SynkmerError> {
        self.loci = gff::load_gff(path, feature, id_key)?;
        Ok(())
    }

    /// Extracts and counts both flanking windows of every locus, one rayon
    /// task per locus. A window that cannot be counted (absent, shorter
    /// than K, or without a usable run) becomes a missing channel.
    pub fn count_windows(
        &mut self,
        sequences: &AHashMap<String, Vec<u8>>,
    ) -> Result<(), SynkmerError> {
        let k = self.k;
        let canonical = self.canonical;
        let window = self.window;
        let counted: Result<Vec<_>, SynkmerError> = self
            .loci
            .par_iter()
            .map(|locus| {
                let flanks = match windows::extract_windows(locus, sequences, window) {
                    Some(flanks) => flanks,
                    None => {
                        warn!(
                            "sequence '{}' for locus {} not found in the FASTA input",
                            locus.seqname, locus.id
                        );
                        return Ok((None, None));
                    }
                };
                let up = build_channel(flanks.upstream, k, canonical, &locus.id, "upstream")?;
                let down =
                    build_channel(flanks.downstream, k, canonical, &locus.id, "downstream")?;
                Ok((up, down))
            })
            .collect();
        for (up, down) in counted? {
            self.upstream.push(up);
            self.downstream.push(down);
        }
        Ok(())
    }

    /// Aligns each channel's sparse counters onto that channel's label
    /// union. Comparing more than one locus requires the single-word range.
    pub fn merge_channels(&mut self) -> Result<(), SynkmerError> {
        if self.loci.len() > 1 && self.k > MAX_K_SINGLE {
            return Err(SynkmerError::Configuration(format!(
                "comparing multiple loci requires k <= {MAX_K_SINGLE} (label merge is unsupported for wider codes)"
            )));
        }
        let mut up: Vec<&mut KmerCounter> = self
            .upstream
            .iter_mut()
            .filter_map(|c| c.as_mut().map(|ch| &mut ch.counter))
            .collect();
        merge_counters(&mut up)?;
        let mut down: Vec<&mut KmerCounter> = self
            .downstream
            .iter_mut()
            .filter_map(|c| c.as_mut().map(|ch| &mut ch.counter))
            .collect();
        merge_counters(&mut down)?;
        Ok(())
    }

    /// Standardizes every counted channel to z-scores.
    pub fn standardize_counts(&mut self) {
        for channel in self.upstream.iter_mut().chain(self.downstream.iter_mut()) {
            if let Some(ch) = channel {
                standardize::standardize(ch.counter.counts_mut());
            }
        }
        self.standardized = true;
    }

    /// Distances for every unordered pair i < j (plus i = i if the metric
    /// asks for it), in deterministic order; the pair list is evaluated in
    /// parallel.
    pub fn pairwise_distances(
        &self,
        metric: DistanceMetric,
    ) -> Result<Vec<DistanceRecord>, SynkmerError> {
        let n = self.loci.len();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            if metric.needs_self_comparison() {
                pairs.push((i, i));
            }
            for j in i + 1..n {
                pairs.push((i, j));
            }
        }
        pairs
            .par_iter()
            .map(|&(i, j)| {
                let upstream = channel_distance(&self.upstream[i], &self.upstream[j], metric)?;
                let downstream =
                    channel_distance(&self.downstream[i], &self.downstream[j], metric)?;
                Ok(DistanceRecord {
                    a: self.loci[i].id.clone(),
                    b: self.loci[j].id.clone(),
                    upstream,
                    downstream,
                })
            })
            .collect()
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    pub fn upstream_counter(&self, index: usize) -> Option<&KmerCounter> {
        self.upstream[index].as_ref().map(|ch| &ch.counter)
    }

    pub fn downstream_counter(&self, index: usize) -> Option<&KmerCounter> {
        self.downstream[index].as_ref().map(|ch| &ch.counter)
    }

    pub fn upstream_window(&self, index: usize) -> Option<&[u8]> {
        self.upstream[index].as_ref().map(|ch| ch.seq.as_slice())
    }

    pub fn downstream_window(&self, index: usize) -> Option<&[u8]> {
        self.downstream[index].as_ref().map(|ch| ch.seq.as_slice())
    }

    pub fn is_standardized(&self) -> bool {
        self.standardized
    }
}

fn build_channel(
    seq: Option<Vec<u8>>,
    k: usize,
    canonical: bool,
    id: &str,
    side: &str,
) -> Result<Option<Channel>, SynkmerError> {
    let seq = match seq {
        Some(seq) => seq,
        None => {
            warn!("locus {id} has no {side} window");
            return Ok(None);
        }
    };
    let mut counter = KmerCounter::for_k(k, canonical)?;
    match counter.count(&seq) {
        Ok(()) => Ok(Some(Channel { seq, counter })),
        Err(SynkmerError::Input(msg)) => {
            warn!("skipping the {side} window of locus {id}: {msg}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn channel_distance(
    a: &Option<Channel>,
    b: &Option<Channel>,
    metric: DistanceMetric,
) -> Result<Option<f64>, SynkmerError> {
    match (a, b) {
        (Some(x), Some(y)) => Ok(Some(metric.compute(x.counter.counts(), y.counter.counts())?)),
        _ => Ok(None),
    }
}
