use thiserror::Error;

/// Core result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the aggregation engine and its store collaborators.
///
/// Malformed transaction records and zero targets are recovered locally and
/// never show up here.
#[derive(Debug, Error)]
pub enum Error {
    /// The external store could not be reached, refused the request, or
    /// returned a payload that could not be decoded.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid month key '{0}', expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("Invalid target amount {0}, expected a non-negative number")]
    InvalidAmount(f64),

    #[error("Subject {subject_id} already has a target for {month_key}")]
    DuplicateTarget {
        subject_id: String,
        month_key: String,
    },
}

impl Error {
    /// Whether the caller should offer a retry rather than an empty state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::DataUnavailable(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::DataUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DataUnavailable(format!("Failed to decode store payload: {}", err))
    }
}
