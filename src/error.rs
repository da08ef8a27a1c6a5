use thiserror::Error;

/// Convenience result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Error type returned by load and export operations.
///
/// Query-side problems (out-of-range page numbers, bad column indexes) are
/// corrected by clamping/ignoring and never surface here; the only fatal load
/// condition is an input with zero parseable rows.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error during export.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input contained no lines at all.
    #[error("empty input: no lines found")]
    EmptyInput,

    /// No line in the input could be tokenized.
    ///
    /// Carries the number of skipped lines and a sample of the first offending
    /// line so callers can show users what was rejected.
    #[error(
        "no parseable rows ({skipped} lines skipped; first offending line: {sample:?}). \
         expected a tab- or space-delimited record per line, with status code + title \
         in column 7 (e.g. 'AMiss', 'VMr')"
    )]
    NoParseableRows { skipped: usize, sample: String },
}
