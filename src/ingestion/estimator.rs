//! Column-count inference over a sample of tokenized rows.
//!
//! The file carries no explicit schema; the canonical column count `C` is the
//! modal token count across the first rows of the file. Rows that disagree
//! with `C` are ragged and get repaired by the record builder, never dropped.

use std::collections::HashMap;

use crate::types::{ColumnSchema, MIN_COLUMN_COUNT};

/// Default number of tokenized rows sampled for the modal count.
pub const DEFAULT_SAMPLE_ROWS: usize = 500;

/// Result of the sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnEstimate {
    /// Inferred schema (modal token count, floored at [`MIN_COLUMN_COUNT`]).
    pub schema: ColumnSchema,
    /// Number of rows inspected.
    pub sampled_rows: usize,
    /// Sampled rows whose token count disagreed with the modal count.
    pub ragged_in_sample: usize,
}

/// Infer the canonical column count from up to `sample_rows` tokenized rows.
///
/// Ties between equally frequent counts break toward the larger count, so a
/// file where a trailing date field merges with its neighbor in half the
/// rows keeps the wider schema and repairs the merged rows instead of
/// truncating the clean ones.
///
/// An empty sample yields the minimum schema width; the loader rejects such
/// inputs before records are built.
pub fn estimate_columns(rows: &[Vec<String>], sample_rows: usize) -> ColumnEstimate {
    let sample = &rows[..rows.len().min(sample_rows.max(1))];

    let mut freq: HashMap<usize, usize> = HashMap::new();
    for row in sample {
        *freq.entry(row.len()).or_insert(0) += 1;
    }

    let modal = freq
        .iter()
        .max_by_key(|&(count, n)| (*n, *count))
        .map(|(count, _)| *count)
        .unwrap_or(MIN_COLUMN_COUNT);

    let schema = ColumnSchema::new(modal);
    let ragged_in_sample = sample
        .iter()
        .filter(|row| row.len() != schema.column_count)
        .count();

    ColumnEstimate {
        schema,
        sampled_rows: sample.len(),
        ragged_in_sample,
    }
}
