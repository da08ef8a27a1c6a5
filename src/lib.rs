//! `cra-report-analyzer` is the analysis core for TransUnion-style CRA report
//! extracts: large flat files that are tab- or space-run-delimited, carry no
//! explicit schema, and pack a status code and a title into one composite
//! column.
//!
//! The crate ingests raw file bytes into an immutable in-memory
//! [`store::TableStore`], then answers filter/pagination queries and CSV
//! export requests over it. The presentation layer (widgets, upload
//! transport) is a caller, not part of this crate.
//!
//! ## What loading does
//!
//! - **Delimiter detection** per line: a line containing a tab splits on
//!   single tabs (trailing empties preserved); otherwise it splits on runs of
//!   whitespace.
//! - **Column-count inference**: the modal token count over the first rows
//!   (default 500) becomes the canonical width `C`; see
//!   [`ingestion::estimator`].
//! - **Ragged-row repair**: short rows are right-padded, long rows have
//!   excess trailing tokens merged into the last column. No row is dropped
//!   for raggedness; blank and binary lines are skipped and counted.
//! - **Composite decomposition**: the documented column 7 splits into a
//!   one-character status code (uppercased) plus the remaining title, e.g.
//!   `AMiss` → `A` + `Miss`.
//!
//! The only fatal load condition is an input with zero parseable lines.
//!
//! ## Quick example: load, filter, page
//!
//! ```rust
//! use cra_report_analyzer::ingestion::{load_from_bytes, LoadOptions};
//! use cra_report_analyzer::query::{run_query, FilterParams, PageSize};
//!
//! # fn main() -> Result<(), cra_report_analyzer::AnalyzerError> {
//! let input = b"864652\t2.24E+32\t0\t0\t0\t0\tAMiss\tSarah\tLawrence\n\
//!               590885\t2.27E+32\t0\t0\t0\t0\tMMiss\tCharlotte\tGiles\n";
//! let outcome = load_from_bytes(input, &LoadOptions::default())?;
//! assert_eq!(outcome.stats.rows, 2);
//!
//! let mut params = FilterParams::default();
//! params.status_codes = ['A'].into_iter().collect();
//!
//! let page = run_query(&outcome.table, &params, PageSize::default(), 1);
//! assert_eq!(page.filtered_rows, 1);
//! assert_eq!(page.records[0].first_name(), "Sarah");
//! assert_eq!(page.records[0].title(), "Miss");
//! # Ok(())
//! # }
//! ```
//!
//! ## Export
//!
//! Export serializes the **full** filtered set (never just the current page)
//! with a header matching the documented layout:
//!
//! ```rust
//! use cra_report_analyzer::export::{export_csv, export_filename};
//! use cra_report_analyzer::ingestion::{load_from_bytes, LoadOptions};
//! use cra_report_analyzer::query::FilterParams;
//!
//! # fn main() -> Result<(), cra_report_analyzer::AnalyzerError> {
//! let input = b"864652\tx\t0\t0\t0\t0\tAMiss\tSarah\tLawrence\n";
//! let outcome = load_from_bytes(input, &LoadOptions::default())?;
//!
//! let bytes = export_csv(&outcome.table, &FilterParams::default())?;
//! let text = String::from_utf8(bytes).unwrap();
//! assert!(text.starts_with("Account_ID,"));
//! assert!(export_filename().starts_with("cra_report_filtered_"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Loads can report to a [`ingestion::LoadObserver`] (stderr, file, or a
//! composite), including a schema-ambiguity warning when too many sampled
//! rows disagree with the modal column count:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cra_report_analyzer::ingestion::{
//!     load_from_path, LoadOptions, LoadSeverity, StdErrObserver,
//! };
//!
//! # fn main() -> Result<(), cra_report_analyzer::AnalyzerError> {
//! let opts = LoadOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     alert_at_or_above: LoadSeverity::Critical,
//!     ..Default::default()
//! };
//! let outcome = load_from_path("report.txt", &opts)?;
//! println!("rows={} skipped={}", outcome.stats.rows, outcome.stats.skipped_lines);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: tokenizer, column-count estimator, record builder, load
//!   entrypoints, observer layer
//! - [`store`]: the immutable table handle with distinct-value queries
//! - [`query`]: predicate set, filter engine, paginator
//! - [`export`]: filtered CSV serialization + timestamped filenames
//! - [`types`]: records, schema, well-known column indexes
//! - [`error`]: error types used across the crate

pub mod error;
pub mod export;
pub mod ingestion;
pub mod query;
pub mod store;
pub mod types;

pub use error::{AnalyzerError, AnalyzerResult};
