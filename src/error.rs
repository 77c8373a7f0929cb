use thiserror::Error;

/// Feed-level failure for one fetch/extract cycle. Individual bad rows or
/// columns never surface here; they are skipped during extraction.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch spreadsheet: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("spreadsheet endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("spreadsheet endpoint returned HTML instead of CSV (is the sheet published?)")]
    NotCsv,

    #[error("could not parse CSV payload: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV payload contains no rows")]
    EmptyFeed,

    #[error("sheet layout mismatch: {0}")]
    Layout(String),
}

impl FeedError {
    /// True when the failure happened before any text was received.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, FeedError::Fetch(_) | FeedError::Status(_))
    }
}
