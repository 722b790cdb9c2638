use ahash::AHashMap;

use crate::kmer::reverse_complement;
use crate::locus::Locus;

/// The flanking windows of one locus, already strand-oriented: for a
/// minus-strand locus the sides are swapped and each window is
/// reverse-complemented.
pub struct FlankingWindows {
    pub upstream: Option<Vec<u8>>,
    pub downstream: Option<Vec<u8>>,
}

/// Cuts up to `window` bases on each side of the locus, clamped at contig
/// boundaries. Returns `None` when the locus names a sequence absent from
/// the input.
pub fn extract_windows(
    locus: &Locus,
    sequences: &AHashMap<String, Vec<u8>>,
    window: usize,
) -> Option<FlankingWindows> {
    let seq = sequences.get(&locus.seqname)?;
    let len = seq.len() as u64;
    let window = window as u64;

    // 0-based half-open locus coordinates, clamped into the contig.
    let start = locus.start.saturating_sub(1).min(len);
    let end = locus.end.min(len);

    let left_from = start.saturating_sub(window);
    let left = &seq[left_from as usize..start as usize];
    let right_to = (end + window).min(len);
    let right = &seq[end as usize..right_to as usize];

    let (upstream, downstream) = if locus.reverse {
        (
            non_empty(reverse_complement(right)),
            non_empty(reverse_complement(left)),
        )
    } else {
        (non_empty(left.to_vec()), non_empty(right.to_vec()))
    };
    Some(FlankingWindows {
        upstream,
        downstream,
    })
}

fn non_empty(window: Vec<u8>) -> Option<Vec<u8>> {
    if window.is_empty() {
        None
    } else {
        Some(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequences() -> AHashMap<String, Vec<u8>> {
        let mut map = AHashMap::default();
        map.insert("chrI".to_string(), b"AAAACCCCGGGGTTTT".to_vec());
        map
    }

    fn locus(start: u64, end: u64, reverse: bool) -> Locus {
        Locus {
            id: "g".to_string(),
            seqname: "chrI".to_string(),
            start,
            end,
            reverse,
        }
    }

    #[test]
    fn test_forward_windows() {
        let flanks = extract_windows(&locus(7, 10, false), &sequences(), 4).unwrap();
        assert_eq!(flanks.upstream.unwrap(), b"AACC".to_vec());
        assert_eq!(flanks.downstream.unwrap(), b"GGTT".to_vec());
    }

    #[test]
    fn test_minus_strand_swaps_and_complements() {
        let flanks = extract_windows(&locus(7, 10, true), &sequences(), 4).unwrap();
        // Plus-strand right window GGTT becomes the upstream side, reverse
        // complemented.
        assert_eq!(flanks.upstream.unwrap(), b"AACC".to_vec());
        assert_eq!(flanks.downstream.unwrap(), b"GGTT".to_vec());
    }

    #[test]
    fn test_clamped_at_contig_start() {
        let flanks = extract_windows(&locus(3, 6, false), &sequences(), 10).unwrap();
        assert_eq!(flanks.upstream.unwrap(), b"AA".to_vec());
    }

    #[test]
    fn test_no_window_at_contig_edge() {
        let flanks = extract_windows(&locus(1, 4, false), &sequences(), 5).unwrap();
        assert!(flanks.upstream.is_none());
        assert!(flanks.downstream.is_some());
    }

    #[test]
    fn test_unknown_sequence() {
        let mut l = locus(1, 4, false);
        l.seqname = "chrX".to_string();
        assert!(extract_windows(&l, &sequences(), 5).is_none());
    }
}
