use thiserror::Error;

/// Error kinds surfaced by the counting engine and its pipelines.
#[derive(Debug, Error)]
pub enum SynkmerError {
    /// Unsupported k-mer length for the chosen representation, unknown
    /// distance method name, and similar configuration-time rejections.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A sample or window yielded nothing countable.
    #[error("input error: {0}")]
    Input(String),

    /// Two count vectors of different lengths reached a distance
    /// computation; a merge step is missing or inconsistent upstream.
    #[error("cannot compare count vectors of different lengths ({left} vs {right})")]
    Alignment { left: usize, right: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
