//! Record construction: positional assignment, ragged-row repair, and
//! composite status/title decomposition.

use crate::types::{columns, ColumnSchema, Record};

/// Build a [`Record`] from a token sequence and the inferred schema.
///
/// Repair policy for rows whose token count disagrees with the schema width
/// (no row is ever dropped for raggedness):
///
/// - short rows are right-padded with empty fields;
/// - long rows have their excess trailing tokens merged into the last
///   canonical column, joined with a single space (the documented case is a
///   trailing date field that lost its delimiter).
///
/// The composite column (documented column 7) decomposes into a one-character
/// status code (uppercased) and the remainder as title. Unrecognized first
/// characters are preserved as-is; an empty composite column leaves both
/// derived fields empty.
///
/// Returns the record and whether the row needed repair.
pub fn build_record(mut tokens: Vec<String>, schema: &ColumnSchema) -> (Record, bool) {
    let width = schema.column_count;
    let ragged = tokens.len() != width;

    if tokens.len() < width {
        tokens.resize(width, String::new());
    } else if tokens.len() > width {
        let excess = tokens.split_off(width - 1);
        tokens.push(excess.join(" "));
    }

    let (status_code, title) = decompose_status_title(&tokens[columns::STATUS_TITLE]);
    (Record::new(tokens, status_code, title), ragged)
}

fn decompose_status_title(raw: &str) -> (String, String) {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => (
            first.to_ascii_uppercase().to_string(),
            chars.as_str().to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
