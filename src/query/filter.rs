//! The filter engine: one ordered pass producing a view of matching indices.

use rayon::prelude::*;

use crate::store::TableStore;

use super::predicate::{CompiledFilter, FilterParams};

/// Row count above which [`apply`] switches to the chunked parallel scan.
const PARALLEL_FILTER_THRESHOLD: usize = 50_000;

/// Rows per chunk for the parallel scan.
const FILTER_CHUNK_SIZE: usize = 8_192;

/// Ordered set of record indices satisfying the AND of all active predicates.
///
/// Indices are strictly ascending original-file positions into the table the
/// view was computed from; the view never copies or reorders records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no record matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The matching indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Evaluate the active predicates over the whole table.
///
/// Deterministic and order-preserving: for a fixed table and predicate set
/// the result is always identical and always ascending. Large tables use a
/// chunked parallel scan whose concatenated result is identical to the
/// sequential pass.
pub fn apply(table: &TableStore, params: &FilterParams) -> FilteredView {
    let compiled = CompiledFilter::compile(params, &table.schema());
    if table.len() >= PARALLEL_FILTER_THRESHOLD {
        apply_chunked(table, &compiled, FILTER_CHUNK_SIZE)
    } else {
        apply_sequential(table, &compiled)
    }
}

fn apply_sequential(table: &TableStore, compiled: &CompiledFilter) -> FilteredView {
    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| compiled.matches(rec))
        .map(|(idx, _)| idx)
        .collect();
    FilteredView { indices }
}

/// Chunked scan: partition the table into index ranges, filter each range
/// independently, and concatenate the partial index lists in range order.
fn apply_chunked(table: &TableStore, compiled: &CompiledFilter, chunk_size: usize) -> FilteredView {
    let records = table.records();
    let per_chunk: Vec<Vec<usize>> = chunk_ranges(records.len(), chunk_size)
        .into_par_iter()
        .map(|range| {
            let mut out = Vec::new();
            for idx in range {
                if compiled.matches(&records[idx]) {
                    out.push(idx);
                }
            }
            out
        })
        .collect();

    FilteredView {
        indices: per_chunk.into_iter().flatten().collect(),
    }
}

fn chunk_ranges(row_count: usize, chunk_size: usize) -> Vec<std::ops::Range<usize>> {
    if row_count == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(row_count.div_ceil(chunk_size));
    let mut start = 0usize;
    while start < row_count {
        let end = (start + chunk_size).min(row_count);
        out.push(start..end);
        start = end;
    }
    out
}
