use std::cmp::Ordering;

use crate::error::SynkmerError;
use crate::kmer::{KmerCounter, MAX_K_SINGLE};

/// Merge-join union of two sorted, deduplicated code lists.
fn union_sorted(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Aligns every sparse counter onto the union of all observed codes: one
/// fold pass building the global union, one reinsert pass zero-filling each
/// counter over it. Dense counters already share the total label space and
/// are left alone; the wide representation exceeds the supported merge
/// width.
pub fn merge_counters(counters: &mut [&mut KmerCounter]) -> Result<(), SynkmerError> {
    if counters.len() < 2 {
        return Ok(());
    }
    match &*counters[0] {
        KmerCounter::Dense(_) => Ok(()),
        KmerCounter::Wide(_) => Err(SynkmerError::Configuration(format!(
            "merging k-mer labels is only supported for k <= {MAX_K_SINGLE}"
        ))),
        KmerCounter::Sparse(_) => {
            let mut union: Vec<u64> = Vec::new();
            for counter in counters.iter() {
                if let KmerCounter::Sparse(sparse) = &**counter {
                    union = union_sorted(&union, sparse.labels());
                }
            }
            for counter in counters.iter_mut() {
                counter.merge(&union)?;
            }
            Ok(())
        }
    }
}
