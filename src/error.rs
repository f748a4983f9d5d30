use thiserror::Error;

/// Everything that can go wrong while loading, transforming, or clustering data.
///
/// None of these are recovered from inside a run: the engine fails fast
/// and hands the error back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("cluster {0} has no members to average")]
    EmptyCluster(usize),
    #[error("interrupted before iteration {0}")]
    Interrupted(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("unparseable coordinate {value:?} on line {line}")]
    Parse {
        line: u64,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameters(message.into())
    }
    pub(crate) fn mismatch(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
