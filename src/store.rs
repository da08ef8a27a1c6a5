//! In-memory table of loaded records.
//!
//! A [`TableStore`] is read-only after construction: a new upload builds a new
//! store and replaces the old handle wholesale, so partially built tables are
//! never observable.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ColumnSchema, Record};

/// The full ordered record sequence for one loaded file, plus derived
/// statistics.
///
/// Record order is original file order; it is the stable sort key whenever no
/// explicit sort is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStore {
    records: Vec<Record>,
    schema: ColumnSchema,
    status_counts: BTreeMap<char, usize>,
}

impl TableStore {
    /// Build a store from constructed records. Status-code counts are
    /// computed once here.
    pub(crate) fn new(records: Vec<Record>, schema: ColumnSchema) -> Self {
        let mut status_counts = BTreeMap::new();
        for rec in &records {
            if let Some(code) = rec.status_char() {
                *status_counts.entry(code).or_insert(0) += 1;
            }
        }
        Self {
            records,
            schema,
            status_counts,
        }
    }

    /// Total record count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record by zero-based original-file index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records in original file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The inferred schema.
    pub fn schema(&self) -> ColumnSchema {
        self.schema
    }

    /// Canonical column count `C`.
    pub fn column_count(&self) -> usize {
        self.schema.column_count
    }

    /// Observed status codes with per-code record counts.
    ///
    /// Includes unrecognized codes; records with an empty composite column
    /// are not counted here.
    pub fn status_counts(&self) -> &BTreeMap<char, usize> {
        &self.status_counts
    }

    /// The distinct status codes observed, in sorted order.
    pub fn distinct_status_codes(&self) -> Vec<char> {
        self.status_counts.keys().copied().collect()
    }

    /// Distinct non-empty values observed in a column, sorted.
    ///
    /// Used to populate selectable filter options. An out-of-range column
    /// yields an empty set rather than an error.
    pub fn distinct_values(&self, column: usize) -> Vec<String> {
        if !self.schema.contains(column) {
            return Vec::new();
        }
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(|rec| rec.field(column))
            .filter(|v| !v.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}
