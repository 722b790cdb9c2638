//! K-mer composition comparison of genomic loci and their flanking
//! sequences: sequence splitting, 2-bit encoding, dense and sparse
//! counting, label merging and pairwise distance computation.

pub mod cli_main;
pub mod dist;
pub mod error;
pub mod io;
pub mod kmer;
pub mod locus;
pub mod visualize;
