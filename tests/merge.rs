use synkmer::kmer::merge::merge_counters;
use synkmer::kmer::{KmerCounter, Labels};

fn labels_of(counter: &KmerCounter) -> Vec<u64> {
    match counter.labels() {
        Labels::Single(l) => l.to_vec(),
        Labels::Wide(_) => panic!("expected single-word labels"),
    }
}

fn sparse_pair() -> (KmerCounter, KmerCounter) {
    let mut a = KmerCounter::for_k(12, false).unwrap();
    let mut b = KmerCounter::for_k(12, false).unwrap();
    a.count(b"ACGTACGTACGTACGTACGTTGCA").unwrap();
    b.count(b"GGGGGGGGGGGGTTTTTTTTTTTTTTTT").unwrap();
    (a, b)
}

#[test]
fn test_merge_aligns_every_counter() {
    let (mut a, mut b) = sparse_pair();
    {
        let mut counters = vec![&mut a, &mut b];
        merge_counters(&mut counters).unwrap();
    }
    assert_eq!(a.size(), b.size());
    assert_eq!(labels_of(&a), labels_of(&b));
    assert!(labels_of(&a).windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_merge_is_idempotent() {
    let (mut a, mut b) = sparse_pair();
    {
        let mut counters = vec![&mut a, &mut b];
        merge_counters(&mut counters).unwrap();
    }
    let labels_once = labels_of(&a);
    let counts_once_a = a.counts().clone();
    let counts_once_b = b.counts().clone();
    {
        let mut counters = vec![&mut a, &mut b];
        merge_counters(&mut counters).unwrap();
    }
    assert_eq!(labels_of(&a), labels_once);
    assert_eq!(a.counts(), &counts_once_a);
    assert_eq!(b.counts(), &counts_once_b);
}

#[test]
fn test_merge_is_order_independent() {
    let (mut a1, mut b1) = sparse_pair();
    let (mut a2, mut b2) = sparse_pair();
    {
        let mut counters = vec![&mut a1, &mut b1];
        merge_counters(&mut counters).unwrap();
    }
    {
        let mut counters = vec![&mut b2, &mut a2];
        merge_counters(&mut counters).unwrap();
    }
    assert_eq!(labels_of(&a1), labels_of(&a2));
    assert_eq!(a1.counts(), a2.counts());
    assert_eq!(b1.counts(), b2.counts());
}

#[test]
fn test_merge_preserves_counts_and_zero_fills() {
    let (mut a, mut b) = sparse_pair();
    let a_before: Vec<(u64, f64)> = labels_of(&a)
        .into_iter()
        .zip(a.counts().iter().copied())
        .collect();
    {
        let mut counters = vec![&mut a, &mut b];
        merge_counters(&mut counters).unwrap();
    }
    let merged: Vec<(u64, f64)> = labels_of(&a)
        .into_iter()
        .zip(a.counts().iter().copied())
        .collect();
    for (label, count) in &a_before {
        let found = merged.iter().find(|(l, _)| l == label).unwrap();
        assert_eq!(found.1, *count);
    }
    // Labels contributed only by b have a zero count in a.
    let zero_filled = merged.iter().filter(|(_, c)| *c == 0.0).count();
    assert_eq!(zero_filled, merged.len() - a_before.len());
    assert!(zero_filled > 0);
}

#[test]
fn test_dense_counters_need_no_merge() {
    let mut a = KmerCounter::for_k(4, false).unwrap();
    let mut b = KmerCounter::for_k(4, false).unwrap();
    a.count(b"ACGTACGT").unwrap();
    b.count(b"TTTTTTTT").unwrap();
    let before = a.counts().clone();
    {
        let mut counters = vec![&mut a, &mut b];
        merge_counters(&mut counters).unwrap();
    }
    assert_eq!(a.counts(), &before);
    assert_eq!(a.size(), b.size());
}

#[test]
fn test_merge_rejects_wide_counters() {
    let mut a = KmerCounter::for_k(45, false).unwrap();
    let mut b = KmerCounter::for_k(45, false).unwrap();
    let mut counters = vec![&mut a, &mut b];
    assert!(merge_counters(&mut counters).is_err());
}
