use std::path::PathBuf;
use thiserror::Error;

/// Why a single input line could not be turned into a record.
/// These are recoverable: the line is skipped and parsing goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordErr {
    #[error("expected 7 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("could not parse {field} from {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Fatal errors of the two applications.
#[derive(Debug, Error)]
pub enum ArcbenchError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("could not draw chart {path}: {reason}")]
    Plot { path: PathBuf, reason: String },

    #[error("could not register the bundled chart font")]
    Font,

    #[error("a string pool needs at least one string")]
    EmptyPool,

    #[error("could not build the benchmark thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("could not install the tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}
