//! CSV export of the full filtered record set.
//!
//! Export always serializes every record matching the active predicates, not
//! just the currently displayed page. The header follows the documented
//! layout, with the derived `Status_Code` and `Title` columns placed
//! immediately after `Status_Title`.

use chrono::{DateTime, Local};

use crate::error::AnalyzerResult;
use crate::query::{apply, FilterParams};
use crate::store::TableStore;
use crate::types::{column_label, columns, ColumnSchema};

/// Serialize the filtered record set as CSV bytes with a header row.
pub fn export_csv(table: &TableStore, params: &FilterParams) -> AnalyzerResult<Vec<u8>> {
    let view = apply(table, params);
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(export_header(&table.schema()))?;

    for &idx in view.indices() {
        if let Some(rec) = table.get(idx) {
            let mut row: Vec<&str> = Vec::with_capacity(table.column_count() + 2);
            for (col, value) in rec.fields().iter().enumerate() {
                row.push(value);
                if col == columns::STATUS_TITLE {
                    row.push(rec.status_code());
                    row.push(rec.title());
                }
            }
            wtr.write_record(&row)?;
        }
    }

    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// The export header: one label per table column, with `Status_Code` and
/// `Title` inserted after `Status_Title`.
pub fn export_header(schema: &ColumnSchema) -> Vec<String> {
    let mut header = Vec::with_capacity(schema.column_count + 2);
    for col in 0..schema.column_count {
        header.push(column_label(col));
        if col == columns::STATUS_TITLE {
            header.push("Status_Code".to_string());
            header.push("Title".to_string());
        }
    }
    header
}

/// Generated download filename for the current local time.
pub fn export_filename() -> String {
    export_filename_at(Local::now())
}

/// Filename for a given timestamp; split out so tests can pin the time.
pub fn export_filename_at(now: DateTime<Local>) -> String {
    format!("cra_report_filtered_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
