//! Plot output for pairwise distances.

pub mod heatmap;
