use cra_report_analyzer::ingestion::{load_from_path, LoadOptions};
use cra_report_analyzer::query::{
    apply, paginate, run_query, AccountIdQuery, ColumnQuery, FilterParams, PageSize,
};
use cra_report_analyzer::store::TableStore;

const FIXTURE: &str = "tests/fixtures/sample_report.txt";

fn fixture_table() -> TableStore {
    load_from_path(FIXTURE, &LoadOptions::default()).unwrap().table
}

#[test]
fn status_multiselect_filters_by_membership() {
    let table = fixture_table();
    let mut params = FilterParams::default();
    params.status_codes = ['A', 'M'].into_iter().collect();

    let view = apply(&table, &params);
    assert_eq!(view.len(), 4);
    for &idx in view.indices() {
        let code = table.get(idx).unwrap().status_code().to_string();
        assert!(code == "A" || code == "M");
    }
}

#[test]
fn exact_account_id_returns_one_record() {
    let table = fixture_table();
    let params = FilterParams {
        account_id: Some(AccountIdQuery {
            query: "590885".to_string(),
            exact: true,
        }),
        ..Default::default()
    };
    let view = apply(&table, &params);
    assert_eq!(view.len(), 1);
    assert_eq!(table.get(view.indices()[0]).unwrap().last_name(), "Giles");
}

#[test]
fn partial_account_id_is_a_substring_match() {
    let table = fixture_table();
    let params = FilterParams {
        account_id: Some(AccountIdQuery {
            query: "88".to_string(),
            exact: false,
        }),
        ..Default::default()
    };
    let view = apply(&table, &params);
    let ids: Vec<&str> = view
        .indices()
        .iter()
        .map(|&i| table.get(i).unwrap().account_id())
        .collect();
    assert_eq!(ids, vec!["590885", "778899"]);
}

#[test]
fn postcode_matches_either_postcode_column() {
    let table = fixture_table();
    let params = FilterParams {
        postcode: Some("me7".to_string()),
        ..Default::default()
    };
    let view = apply(&table, &params);
    let ids: Vec<&str> = view
        .indices()
        .iter()
        .map(|&i| table.get(i).unwrap().account_id())
        .collect();
    assert_eq!(ids, vec!["864652", "778899"]);
}

#[test]
fn name_queries_combine_with_and_semantics() {
    let table = fixture_table();

    let last_only = FilterParams {
        last_name: Some("lawrence".to_string()),
        ..Default::default()
    };
    assert_eq!(apply(&table, &last_only).len(), 2);

    let both = FilterParams {
        first_name: Some("sarah".to_string()),
        last_name: Some("lawrence".to_string()),
        ..Default::default()
    };
    let view = apply(&table, &both);
    assert_eq!(view.len(), 1);
    assert_eq!(table.get(view.indices()[0]).unwrap().account_id(), "864652");
}

#[test]
fn generic_column_search_works_on_any_column() {
    let table = fixture_table();
    let params = FilterParams {
        column_search: Some(ColumnQuery {
            column: 11, // an address column in the fixture layout
            query: "street".to_string(),
        }),
        ..Default::default()
    };
    let view = apply(&table, &params);
    assert_eq!(view.len(), 2); // Grecian Street, High Street
}

#[test]
fn predicates_combine_with_and_across_types() {
    let table = fixture_table();
    let mut params = FilterParams {
        last_name: Some("lawrence".to_string()),
        ..Default::default()
    };
    params.status_codes = ['A'].into_iter().collect();
    assert_eq!(apply(&table, &params).len(), 2);

    params.postcode = Some("3zb".to_string());
    let view = apply(&table, &params);
    assert_eq!(view.len(), 1);
    assert_eq!(table.get(view.indices()[0]).unwrap().first_name(), "Samuel");
}

#[test]
fn filtered_view_is_deterministic_and_ascending() {
    let table = fixture_table();
    let mut params = FilterParams::default();
    params.status_codes = ['A', 'V'].into_iter().collect();

    let first = apply(&table, &params);
    let second = apply(&table, &params);
    assert_eq!(first, second);
    assert!(first.indices().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn paging_concatenation_reconstructs_the_view() {
    let table = fixture_table();
    let view = apply(&table, &FilterParams::default());

    let page1 = paginate(&table, &view, PageSize::Rows50, 1);
    assert_eq!(page1.page_count, 1);
    assert_eq!(page1.records.len(), view.len());
    assert_eq!(page1.total_rows, 7);

    // Past-the-end page numbers clamp to the final page.
    let clamped = paginate(&table, &view, PageSize::Rows50, 99);
    assert_eq!(clamped, page1);
}

#[test]
fn run_query_end_to_end() {
    let table = fixture_table();
    let mut params = FilterParams::default();
    params.status_codes = ['M'].into_iter().collect();

    let page = run_query(&table, &params, PageSize::default(), 1);
    assert_eq!(page.total_rows, 7);
    assert_eq!(page.filtered_rows, 2);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.records[0].first_name(), "Charlotte");
}

#[test]
fn page_serializes_for_the_presentation_layer() {
    let table = fixture_table();
    let page = run_query(&table, &FilterParams::default(), PageSize::default(), 1);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["total_rows"], 7);
    assert_eq!(json["page_number"], 1);
    assert_eq!(json["records"][0]["status_code"], "A");

    // FilterParams round-trips as a caller-facing DTO.
    let params = FilterParams {
        postcode: Some("ME7".to_string()),
        ..Default::default()
    };
    let text = serde_json::to_string(&params).unwrap();
    let back: FilterParams = serde_json::from_str(&text).unwrap();
    assert_eq!(back, params);
}
