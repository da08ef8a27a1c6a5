//! Filtering and pagination over a loaded table.
//!
//! Most callers should use [`run_query`], which evaluates the active
//! predicates and resolves one page in a single call. The pieces are also
//! available individually:
//!
//! - [`predicate`]: the predicate set ([`FilterParams`]) and its semantics
//! - [`filter`]: the filter engine producing a [`FilteredView`]
//! - [`paginate`]: fixed-size paging over a view

pub mod filter;
pub mod paginate;
pub mod predicate;

pub use filter::{apply, FilteredView};
pub use paginate::{paginate, Page, PageSize};
pub use predicate::{AccountIdQuery, ColumnQuery, FilterParams};

use crate::store::TableStore;

/// The query operation: filter the table with `params`, then serve the
/// requested page.
///
/// Pure with respect to its inputs; the same table, parameters, and page
/// request always produce the same page. Out-of-range page numbers clamp
/// rather than fail.
pub fn run_query(
    table: &TableStore,
    params: &FilterParams,
    size: PageSize,
    page_number: usize,
) -> Page {
    let view = apply(table, params);
    paginate(table, &view, size, page_number)
}
