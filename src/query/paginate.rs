//! Pagination over a filtered view.
//!
//! Pages are fixed-size slices of the view resolved to full records; rows
//! outside the requested page are never materialized.

use serde::{Deserialize, Serialize};

use crate::store::TableStore;
use crate::types::Record;

use super::filter::FilteredView;

/// The fixed set of selectable page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    /// 50 rows per page.
    Rows50,
    /// 100 rows per page (the default).
    #[default]
    Rows100,
    /// 250 rows per page.
    Rows250,
    /// 500 rows per page.
    Rows500,
    /// 1000 rows per page.
    Rows1000,
}

impl PageSize {
    /// All selectable sizes, in ascending order.
    pub const ALL: [PageSize; 5] = [
        PageSize::Rows50,
        PageSize::Rows100,
        PageSize::Rows250,
        PageSize::Rows500,
        PageSize::Rows1000,
    ];

    /// Rows per page.
    pub fn rows(self) -> usize {
        match self {
            PageSize::Rows50 => 50,
            PageSize::Rows100 => 100,
            PageSize::Rows250 => 250,
            PageSize::Rows500 => 500,
            PageSize::Rows1000 => 1000,
        }
    }
}

/// One page of results plus the counts the presentation layer displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Records on this page, in original file order.
    pub records: Vec<Record>,
    /// The served page number (1-indexed), after clamping.
    pub page_number: usize,
    /// Total page count: `ceil(filtered_rows / page_size)`; 0 when the view
    /// is empty.
    pub page_count: usize,
    /// Zero-based offset of the first record within the filtered view.
    pub offset: usize,
    /// Total rows matching the active predicates.
    pub filtered_rows: usize,
    /// Total rows in the table.
    pub total_rows: usize,
}

/// Resolve one page of a filtered view.
///
/// `page_number` is 1-indexed. Numbers past the last valid page clamp to the
/// final page; numbers below 1 clamp to the first. An empty view yields an
/// empty page with `page_count == 0` rather than an error.
pub fn paginate(
    table: &TableStore,
    view: &FilteredView,
    size: PageSize,
    page_number: usize,
) -> Page {
    let per_page = size.rows();
    let filtered_rows = view.len();
    let page_count = filtered_rows.div_ceil(per_page);

    let served = page_number.clamp(1, page_count.max(1));
    let offset = (served - 1) * per_page;
    let end = (offset + per_page).min(filtered_rows);

    let records = view.indices()[offset..end]
        .iter()
        .filter_map(|&idx| table.get(idx).cloned())
        .collect();

    Page {
        records,
        page_number: served,
        page_count,
        offset,
        filtered_rows,
        total_rows: table.len(),
    }
}
