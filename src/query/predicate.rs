//! Filter predicates over records.
//!
//! [`FilterParams`] is the caller-owned bundle of independently toggleable
//! predicates. Each predicate is a pure function of (record, parameter); an
//! absent or blank parameter imposes no constraint. Parameters are passed by
//! value into each filter pass and never mutated by the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{columns, ColumnSchema, Record};

/// Account-id predicate parameter: query string plus exact-match flag.
///
/// Exact mode requires trimmed equality with the account-id column; partial
/// mode requires a case-insensitive contiguous substring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdQuery {
    /// The query string.
    pub query: String,
    /// Require equality instead of substring match.
    pub exact: bool,
}

/// Free-form predicate parameter: one column index plus a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnQuery {
    /// Zero-based column index; out-of-range indexes deactivate the
    /// predicate rather than failing the query.
    pub column: usize,
    /// Case-insensitive substring to search for.
    pub query: String,
}

/// The currently active predicate set.
///
/// Every field defaults to inactive; activating or deactivating one predicate
/// never affects the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Accepted status codes; an empty set matches all records.
    pub status_codes: BTreeSet<char>,
    /// Account-id match (column 1 of the documented layout).
    pub account_id: Option<AccountIdQuery>,
    /// Case-insensitive substring on the first-name column.
    pub first_name: Option<String>,
    /// Case-insensitive substring on the last-name column.
    pub last_name: Option<String>,
    /// Case-insensitive substring matched against either postcode column.
    pub postcode: Option<String>,
    /// Free-form match on any single column.
    pub column_search: Option<ColumnQuery>,
}

impl FilterParams {
    /// Returns `true` if at least one predicate is active.
    pub fn is_active(&self) -> bool {
        !self.status_codes.is_empty()
            || active_query(self.account_id.as_ref().map(|a| a.query.as_str())).is_some()
            || active_query(self.first_name.as_deref()).is_some()
            || active_query(self.last_name.as_deref()).is_some()
            || active_query(self.postcode.as_deref()).is_some()
            || active_query(self.column_search.as_ref().map(|c| c.query.as_str())).is_some()
    }
}

/// A blank or whitespace-only query is treated as inactive.
fn active_query(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}

/// Predicate set compiled for one filter pass: queries are trimmed and
/// lowercased once, inactive predicates dropped, and the generic column
/// index validated against the schema.
#[derive(Debug, Clone)]
pub(crate) struct CompiledFilter {
    status_codes: Option<BTreeSet<char>>,
    account_exact: Option<String>,
    account_partial: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    postcode: Option<String>,
    column_search: Option<(usize, String)>,
}

impl CompiledFilter {
    pub(crate) fn compile(params: &FilterParams, schema: &ColumnSchema) -> Self {
        let (account_exact, account_partial) = match &params.account_id {
            Some(a) => match active_query(Some(&a.query)) {
                Some(q) if a.exact => (Some(q.to_string()), None),
                Some(q) => (None, Some(q.to_lowercase())),
                None => (None, None),
            },
            None => (None, None),
        };

        let column_search = params.column_search.as_ref().and_then(|c| {
            let q = active_query(Some(&c.query))?;
            // Out-of-range column index: ignore the predicate, never fail.
            schema
                .contains(c.column)
                .then(|| (c.column, q.to_lowercase()))
        });

        Self {
            status_codes: (!params.status_codes.is_empty()).then(|| {
                params
                    .status_codes
                    .iter()
                    .map(|c| c.to_ascii_uppercase())
                    .collect()
            }),
            account_exact,
            account_partial,
            first_name: active_query(params.first_name.as_deref()).map(str::to_lowercase),
            last_name: active_query(params.last_name.as_deref()).map(str::to_lowercase),
            postcode: active_query(params.postcode.as_deref()).map(str::to_lowercase),
            column_search,
        }
    }

    /// AND of all active predicates, cheapest first; short-circuits on the
    /// first failure. Evaluation order is an optimization only and never
    /// affects the result.
    pub(crate) fn matches(&self, record: &Record) -> bool {
        if let Some(codes) = &self.status_codes {
            match record.status_char() {
                Some(code) => {
                    if !codes.contains(&code) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(q) = &self.account_exact {
            if record.account_id().trim() != q {
                return false;
            }
        }
        if let Some(q) = &self.account_partial {
            if !contains_ci(record.account_id(), q) {
                return false;
            }
        }

        if let Some(q) = &self.first_name {
            if !contains_ci(record.first_name(), q) {
                return false;
            }
        }
        if let Some(q) = &self.last_name {
            if !contains_ci(record.last_name(), q) {
                return false;
            }
        }

        if let Some(q) = &self.postcode {
            let hit = contains_ci(record.field(columns::POSTCODE_1), q)
                || contains_ci(record.field(columns::POSTCODE_2), q);
            if !hit {
                return false;
            }
        }

        if let Some((column, q)) = &self.column_search {
            if !contains_ci(record.field(*column), q) {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive substring test; `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{AccountIdQuery, ColumnQuery, CompiledFilter, FilterParams};
    use crate::ingestion::builder::build_record;
    use crate::types::{ColumnSchema, Record};

    fn schema() -> ColumnSchema {
        ColumnSchema::new(15)
    }

    fn record(parts: &[&str]) -> Record {
        let (rec, _) = build_record(parts.iter().map(|s| s.to_string()).collect(), &schema());
        rec
    }

    fn sarah() -> Record {
        record(&[
            "864652", "2.24E+32", "0", "0", "0", "0", "AMiss", "Sarah", "Lawrence", "70",
            "VICTORIA", "AVENUE", "Kent", "ME7", "1XY",
        ])
    }

    #[test]
    fn default_params_are_inactive_and_match_everything() {
        let params = FilterParams::default();
        assert!(!params.is_active());
        let compiled = CompiledFilter::compile(&params, &schema());
        assert!(compiled.matches(&sarah()));
    }

    #[test]
    fn blank_queries_are_inactive() {
        let params = FilterParams {
            first_name: Some("   ".to_string()),
            account_id: Some(AccountIdQuery {
                query: String::new(),
                exact: true,
            }),
            ..Default::default()
        };
        assert!(!params.is_active());
        assert!(CompiledFilter::compile(&params, &schema()).matches(&sarah()));
    }

    #[test]
    fn status_membership() {
        let rec = sarah();
        let mut params = FilterParams::default();
        params.status_codes = ['A', 'M'].into_iter().collect();
        assert!(CompiledFilter::compile(&params, &schema()).matches(&rec));

        params.status_codes = ['P', 'V'].into_iter().collect();
        assert!(!CompiledFilter::compile(&params, &schema()).matches(&rec));

        // Lowercase selections normalize to the stored uppercase codes.
        params.status_codes = ['a'].into_iter().collect();
        assert!(CompiledFilter::compile(&params, &schema()).matches(&rec));
    }

    #[test]
    fn status_filter_excludes_empty_composites() {
        let rec = record(&[
            "1", "x", "0", "0", "0", "0", "", "Amy", "Stone", "", "", "", "", "", "",
        ]);
        let mut params = FilterParams::default();
        params.status_codes = ['A'].into_iter().collect();
        assert!(!CompiledFilter::compile(&params, &schema()).matches(&rec));
    }

    #[test]
    fn account_id_exact_vs_partial() {
        let rec = sarah();
        let exact = |q: &str| FilterParams {
            account_id: Some(AccountIdQuery {
                query: q.to_string(),
                exact: true,
            }),
            ..Default::default()
        };
        let partial = |q: &str| FilterParams {
            account_id: Some(AccountIdQuery {
                query: q.to_string(),
                exact: false,
            }),
            ..Default::default()
        };

        assert!(CompiledFilter::compile(&exact("864652"), &schema()).matches(&rec));
        assert!(CompiledFilter::compile(&exact(" 864652 "), &schema()).matches(&rec));
        assert!(!CompiledFilter::compile(&exact("8646"), &schema()).matches(&rec));
        assert!(CompiledFilter::compile(&partial("8646"), &schema()).matches(&rec));
        assert!(!CompiledFilter::compile(&partial("999"), &schema()).matches(&rec));
    }

    #[test]
    fn name_match_is_case_insensitive_and_anded() {
        let rec = sarah();
        let params = FilterParams {
            first_name: Some("sar".to_string()),
            last_name: Some("LAWREN".to_string()),
            ..Default::default()
        };
        assert!(CompiledFilter::compile(&params, &schema()).matches(&rec));

        let params = FilterParams {
            first_name: Some("sar".to_string()),
            last_name: Some("giles".to_string()),
            ..Default::default()
        };
        assert!(!CompiledFilter::compile(&params, &schema()).matches(&rec));
    }

    #[test]
    fn postcode_matches_either_column() {
        let rec = sarah();
        for q in ["me7", "1xy"] {
            let params = FilterParams {
                postcode: Some(q.to_string()),
                ..Default::default()
            };
            assert!(CompiledFilter::compile(&params, &schema()).matches(&rec), "{q}");
        }
        let params = FilterParams {
            postcode: Some("zz9".to_string()),
            ..Default::default()
        };
        assert!(!CompiledFilter::compile(&params, &schema()).matches(&rec));
    }

    #[test]
    fn column_search_hits_one_column_only() {
        let rec = sarah();
        let params = FilterParams {
            column_search: Some(ColumnQuery {
                column: 10,
                query: "victoria".to_string(),
            }),
            ..Default::default()
        };
        assert!(CompiledFilter::compile(&params, &schema()).matches(&rec));

        let params = FilterParams {
            column_search: Some(ColumnQuery {
                column: 11,
                query: "victoria".to_string(),
            }),
            ..Default::default()
        };
        assert!(!CompiledFilter::compile(&params, &schema()).matches(&rec));
    }

    #[test]
    fn out_of_range_column_search_is_ignored() {
        let rec = sarah();
        let params = FilterParams {
            column_search: Some(ColumnQuery {
                column: 99,
                query: "anything".to_string(),
            }),
            ..Default::default()
        };
        assert!(CompiledFilter::compile(&params, &schema()).matches(&rec));
    }
}
