//! Ingestion: tokenization, column-count inference, record construction, and
//! the load entrypoints.
//!
//! Most callers should use [`load_from_path`] or [`load_from_bytes`], which:
//!
//! - tokenize each line with per-line delimiter detection ([`tokenizer`])
//! - infer the canonical column count from a sample ([`estimator`])
//! - build records with ragged-row repair and composite status/title
//!   decomposition ([`builder`])
//! - optionally report outcomes to a [`LoadObserver`]

pub mod builder;
pub mod estimator;
pub mod loader;
pub mod observability;
pub mod tokenizer;

pub use estimator::{estimate_columns, ColumnEstimate, DEFAULT_SAMPLE_ROWS};
pub use loader::{load_from_bytes, load_from_path, LoadOptions, LoadOutcome};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};
