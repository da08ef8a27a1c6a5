//! Core data model types for the report analyzer.
//!
//! A loaded file becomes an ordered sequence of [`Record`]s shaped by an
//! inferred [`ColumnSchema`]. Column positions follow the documented CRA
//! extract layout; see [`columns`] for the well-known indexes.

use serde::{Deserialize, Serialize};

/// Well-known zero-based column indexes of the CRA extract layout.
///
/// The format documentation numbers columns from 1; "column 7" in that
/// numbering is [`columns::STATUS_TITLE`] here.
pub mod columns {
    /// Account identifier (documented column 1).
    pub const ACCOUNT_ID: usize = 0;
    /// Composite status code + title (documented column 7).
    pub const STATUS_TITLE: usize = 6;
    /// First name (documented column 8).
    pub const FIRST_NAME: usize = 7;
    /// Last name (documented column 9).
    pub const LAST_NAME: usize = 8;
    /// First postcode-bearing column (documented column 14).
    pub const POSTCODE_1: usize = 13;
    /// Second postcode-bearing column (documented column 15).
    pub const POSTCODE_2: usize = 14;
}

/// Status codes the format documentation recognizes.
///
/// Unrecognized first characters are still preserved on the record; this set
/// only drives presentation defaults (e.g. quick-filter buttons).
pub const STATUS_CODES: [char; 4] = ['A', 'M', 'P', 'V'];

/// The schema must be wide enough to address account id, the composite
/// status/title column, and the name columns.
pub const MIN_COLUMN_COUNT: usize = 8;

/// Display labels for the documented layout, used for the export header.
const DEFAULT_COLUMN_LABELS: [&str; 18] = [
    "Account_ID",
    "Column_2",
    "Column_3",
    "Column_4",
    "Column_5",
    "Column_6",
    "Status_Title",
    "First_Name",
    "Last_Name",
    "Address_Line_1",
    "Address_Line_2",
    "City",
    "County",
    "Postcode_1",
    "Postcode_2",
    "Date_Field",
    "Column_17",
    "Column_18",
];

/// Display label for a zero-based column index.
///
/// The first 18 columns use the documented names; further columns are named
/// `Column_N` (one-based, matching the documented numbering).
pub fn column_label(index: usize) -> String {
    match DEFAULT_COLUMN_LABELS.get(index) {
        Some(label) => (*label).to_string(),
        None => format!("Column_{}", index + 1),
    }
}

/// Immutable per-file schema inferred by the column-count estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Canonical column count `C`; always `>= MIN_COLUMN_COUNT`.
    pub column_count: usize,
}

impl ColumnSchema {
    /// Create a schema, flooring the count at [`MIN_COLUMN_COUNT`].
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count: column_count.max(MIN_COLUMN_COUNT),
        }
    }

    /// Returns `true` if `index` addresses a column within this schema.
    pub fn contains(&self, index: usize) -> bool {
        index < self.column_count
    }
}

/// One logical row of the loaded file.
///
/// Holds the positional field values (exactly `C` of them, after ragged-row
/// repair) plus the two fields derived from the composite status/title column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<String>,
    status_code: String,
    title: String,
}

impl Record {
    /// Create a record from repaired positional fields and derived values.
    ///
    /// Callers are expected to have already padded/merged `fields` to the
    /// schema width; see `ingestion::builder`.
    pub(crate) fn new(fields: Vec<String>, status_code: String, title: String) -> Self {
        Self {
            fields,
            status_code,
            title,
        }
    }

    /// Positional field value by zero-based index; empty for out-of-range.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// All positional field values in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Account identifier (documented column 1).
    pub fn account_id(&self) -> &str {
        self.field(columns::ACCOUNT_ID)
    }

    /// Raw composite status + title value (documented column 7).
    pub fn status_title(&self) -> &str {
        self.field(columns::STATUS_TITLE)
    }

    /// Derived status code: the composite column's first character,
    /// uppercased. Empty when the composite column was empty.
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Derived title: the composite column minus its first character.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// First name (documented column 8).
    pub fn first_name(&self) -> &str {
        self.field(columns::FIRST_NAME)
    }

    /// Last name (documented column 9).
    pub fn last_name(&self) -> &str {
        self.field(columns::LAST_NAME)
    }

    /// Status code as a `char`, if the composite column was non-empty.
    pub fn status_char(&self) -> Option<char> {
        self.status_code.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_labels_follow_documented_layout() {
        assert_eq!(column_label(0), "Account_ID");
        assert_eq!(column_label(6), "Status_Title");
        assert_eq!(column_label(13), "Postcode_1");
        assert_eq!(column_label(17), "Column_18");
        assert_eq!(column_label(18), "Column_19");
    }

    #[test]
    fn schema_floors_column_count() {
        assert_eq!(ColumnSchema::new(3).column_count, MIN_COLUMN_COUNT);
        assert_eq!(ColumnSchema::new(18).column_count, 18);
        assert!(ColumnSchema::new(18).contains(17));
        assert!(!ColumnSchema::new(18).contains(18));
    }

    #[test]
    fn record_field_access_is_total() {
        let rec = Record::new(
            vec!["864652".to_string(), "x".to_string()],
            "A".to_string(),
            "Miss".to_string(),
        );
        assert_eq!(rec.account_id(), "864652");
        assert_eq!(rec.field(1), "x");
        assert_eq!(rec.field(99), "");
        assert_eq!(rec.status_char(), Some('A'));
    }
}
