//! File input and output: FASTA reading/writing and the tabular/JSON
//! result writers.

pub mod export;
pub mod fasta;
