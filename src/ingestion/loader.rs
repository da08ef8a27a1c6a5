//! Load operation: raw file bytes in, immutable [`TableStore`] out.
//!
//! Loading runs in three phases:
//!
//! 1. tokenize every line, counting blank/binary lines as skipped;
//! 2. infer the canonical column count from a sample of tokenized rows;
//! 3. build records positionally, repairing ragged rows (never dropping them).
//!
//! Construction is a pure function of the input bytes: identical bytes yield
//! identical tables. The only fatal condition is zero parseable lines.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::store::TableStore;
use crate::types::Record;

use super::builder::build_record;
use super::estimator::{estimate_columns, DEFAULT_SAMPLE_ROWS};
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::tokenizer::{line_is_text, tokenize};

/// Row count above which record construction uses the parallel path.
///
/// Building one record never depends on another once the estimator has run,
/// so the parallel path is order-preserving and result-identical.
const PARALLEL_BUILD_THRESHOLD: usize = 10_000;

/// Longest offending-line sample embedded in diagnostics.
const SAMPLE_MAX_LEN: usize = 120;

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Number of tokenized rows sampled by the column-count estimator.
    pub sample_rows: usize,
    /// Fraction of ragged rows in the sample above which a schema-ambiguity
    /// warning is reported to the observer.
    pub ragged_warn_fraction: f64,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at or above which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("sample_rows", &self.sample_rows)
            .field("ragged_warn_fraction", &self.ragged_warn_fraction)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            ragged_warn_fraction: 0.2,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// A successfully loaded table plus its load stats.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The immutable table handle.
    pub table: TableStore,
    /// Row/skip/ragged counts for display and diagnostics.
    pub stats: LoadStats,
}

/// Load a report file from disk.
///
/// When an observer is configured, this reports:
///
/// - `on_success` with row/skip/ragged stats
/// - `on_warning` when the sampled ragged fraction exceeds the threshold
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> AnalyzerResult<LoadOutcome> {
    let path = path.as_ref();
    let ctx = LoadContext {
        source: path.to_path_buf(),
    };

    let result = std::fs::read(path)
        .map_err(AnalyzerError::from)
        .and_then(|bytes| load_impl(&bytes, options, &ctx));
    report(&ctx, options, result)
}

/// Load a report from raw bytes already in memory (e.g. an upload body).
pub fn load_from_bytes(bytes: &[u8], options: &LoadOptions) -> AnalyzerResult<LoadOutcome> {
    let ctx = LoadContext {
        source: PathBuf::from("<memory>"),
    };
    let result = load_impl(bytes, options, &ctx);
    report(&ctx, options, result)
}

fn report(
    ctx: &LoadContext,
    options: &LoadOptions,
    result: AnalyzerResult<LoadOutcome>,
) -> AnalyzerResult<LoadOutcome> {
    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(outcome) => obs.on_success(ctx, outcome.stats),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
    result
}

fn load_impl(bytes: &[u8], options: &LoadOptions, ctx: &LoadContext) -> AnalyzerResult<LoadOutcome> {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        return Err(AnalyzerError::EmptyInput);
    }

    let mut token_rows: Vec<Vec<String>> = Vec::new();
    let mut skipped_lines = 0usize;
    let mut first_offending: Option<String> = None;

    for line in text.lines() {
        if !line_is_text(line) {
            skipped_lines += 1;
            first_offending.get_or_insert_with(|| sample_of(line));
            continue;
        }
        let tokens = tokenize(line);
        if tokens.is_empty() {
            skipped_lines += 1;
            continue;
        }
        token_rows.push(tokens);
    }

    if token_rows.is_empty() {
        return Err(AnalyzerError::NoParseableRows {
            skipped: skipped_lines,
            sample: first_offending.unwrap_or_default(),
        });
    }

    let estimate = estimate_columns(&token_rows, options.sample_rows);
    let schema = estimate.schema;

    let built: Vec<(Record, bool)> = if token_rows.len() >= PARALLEL_BUILD_THRESHOLD {
        token_rows
            .into_par_iter()
            .map(|tokens| build_record(tokens, &schema))
            .collect()
    } else {
        token_rows
            .into_iter()
            .map(|tokens| build_record(tokens, &schema))
            .collect()
    };

    let ragged_rows = built.iter().filter(|(_, ragged)| *ragged).count();
    let records: Vec<Record> = built.into_iter().map(|(rec, _)| rec).collect();

    let stats = LoadStats {
        rows: records.len(),
        skipped_lines,
        ragged_rows,
        column_count: schema.column_count,
    };

    if estimate.sampled_rows > 0 {
        let ragged_fraction = estimate.ragged_in_sample as f64 / estimate.sampled_rows as f64;
        if ragged_fraction > options.ragged_warn_fraction {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_warning(
                    ctx,
                    &format!(
                        "schema ambiguity: {}/{} sampled rows disagree with modal column count {} \
                         ({} rows repaired in total)",
                        estimate.ragged_in_sample,
                        estimate.sampled_rows,
                        schema.column_count,
                        ragged_rows
                    ),
                );
            }
        }
    }

    Ok(LoadOutcome {
        table: TableStore::new(records, schema),
        stats,
    })
}

fn sample_of(line: &str) -> String {
    let printable: String = line
        .chars()
        .map(|c| if c.is_control() { '\u{fffd}' } else { c })
        .collect();
    match printable.char_indices().nth(SAMPLE_MAX_LEN) {
        Some((idx, _)) => format!("{}…", &printable[..idx]),
        None => printable,
    }
}

fn severity_for_error(e: &AnalyzerError) -> LoadSeverity {
    match e {
        AnalyzerError::Io(_) => LoadSeverity::Critical,
        AnalyzerError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        AnalyzerError::EmptyInput => LoadSeverity::Error,
        AnalyzerError::NoParseableRows { .. } => LoadSeverity::Error,
    }
}
