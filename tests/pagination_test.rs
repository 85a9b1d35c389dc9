// Pagination normalization: query parameters are always coerced to valid
// bounds before hitting the store

use newsdesk_backend::models::news::NewsPagination;

#[test]
fn test_defaults_apply() {
    let pagination = NewsPagination::default().normalized();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.limit, 10);
    assert_eq!(pagination.offset(), 0);
}

#[test]
fn test_out_of_range_values_normalize() {
    // limit=0 and limit=500 both fall back to the default of 10
    assert_eq!(NewsPagination { page: 1, limit: 0 }.normalized().limit, 10);
    assert_eq!(NewsPagination { page: 1, limit: 500 }.normalized().limit, 10);

    // page=0 and negative pages normalize to 1
    assert_eq!(NewsPagination { page: 0, limit: 10 }.normalized().page, 1);
    assert_eq!(NewsPagination { page: -3, limit: 10 }.normalized().page, 1);
}

#[test]
fn test_in_range_values_pass_through() {
    let pagination = NewsPagination { page: 4, limit: 100 }.normalized();
    assert_eq!(pagination.page, 4);
    assert_eq!(pagination.limit, 100);
    assert_eq!(pagination.offset(), 300);
}

#[test]
fn test_total_pages_is_ceiling_of_count_over_limit() {
    let pagination = NewsPagination { page: 2, limit: 10 }.normalized();

    let metadata = pagination.metadata(25);
    assert_eq!(metadata.total_pages, 3);
    assert_eq!(metadata.current_page, 2);
    assert_eq!(metadata.current_limit, 10);

    assert_eq!(pagination.metadata(0).total_pages, 0);
    assert_eq!(pagination.metadata(10).total_pages, 1);
    assert_eq!(pagination.metadata(11).total_pages, 2);
}

#[test]
fn test_metadata_serializes_with_api_field_names() {
    let pagination = NewsPagination { page: 1, limit: 10 }.normalized();
    let json = serde_json::to_value(pagination.metadata(42)).unwrap();

    assert_eq!(json["totalPages"], 5);
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["currentLimit"], 10);
}
