use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the ambient layer around the pipeline.
///
/// The aggregation stages themselves never fail: malformed rows are dropped
/// and degenerate input produces an all-zero document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io { action, path: path.into(), source }
    }
}

/// Reasons a survey-year / land-class vocabulary is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("at least one survey year is required")]
    NoYears,

    #[error("at least one land-cover class is required")]
    NoClasses,

    #[error("survey years must be strictly ascending ({previous} is followed by {next})")]
    YearsNotAscending { previous: i32, next: i32 },

    #[error("land-cover class names must be non-empty")]
    EmptyClassName,

    #[error("land-cover class {0:?} has leading or trailing whitespace")]
    UntrimmedClassName(String),

    #[error("land-cover class name {0:?} is reserved for the year field")]
    ReservedClassName(String),

    #[error("land-cover class {0:?} is listed more than once")]
    DuplicateClass(String),

    #[error("land-cover class {0:?} contains the \" - \" label delimiter")]
    DelimiterInClassName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
