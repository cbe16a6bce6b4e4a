use keydash::core::page::{Page, DEFAULT_COUNTER_ID, DEFAULT_TABLE_ID};
use keydash::core::table::{self, parse_leading_number};
use keydash::domain::model::{SortDirection, Table};

fn usage_table() -> Table {
    Table::new(DEFAULT_TABLE_ID)
        .with_header(["Key", "Owner", "Usage", "Expires"])
        .with_rows([
            ["VX-19", "trang", "42", "2025-01-01"],
            ["VX-02", "An", "7.5", "2024-06-30"],
            ["VX-33", "binh", "-3", "2026-12-31"],
            ["VX-04", "Dung", "1000", "2024-01-15"],
            ["VX-05", "chau", "0.25", "2025-09-09"],
        ])
}

fn column_numbers(table: &Table, column: usize) -> Vec<f64> {
    table
        .column(column)
        .into_iter()
        .map(|cell| parse_leading_number(cell).unwrap())
        .collect()
}

#[test]
fn test_numeric_sort_orders_by_value() {
    let mut table = usage_table();

    assert_eq!(table::sort(&mut table, 2).unwrap(), SortDirection::Asc);
    let ascending = column_numbers(&table, 2);
    assert!(ascending.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(table::sort(&mut table, 2).unwrap(), SortDirection::Desc);
    let descending = column_numbers(&table, 2);
    assert!(descending.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_second_sort_is_exact_reverse() {
    let mut table = usage_table();

    table::sort(&mut table, 1).unwrap();
    let first: Vec<_> = table.rows.clone();
    table::sort(&mut table, 1).unwrap();

    let mut reversed = first;
    reversed.reverse();
    assert_eq!(table.rows, reversed);
}

#[test]
fn test_text_sort_ignores_case() {
    let mut table = usage_table();
    table::sort(&mut table, 1).unwrap();
    assert_eq!(table.column(1), vec!["An", "binh", "chau", "Dung", "trang"]);
}

#[test]
fn test_date_column_sorts_by_leading_year() {
    // "2025-01-01" reads as 2025, so same-year rows keep their relative order
    let mut table = usage_table();
    table::sort(&mut table, 3).unwrap();
    assert_eq!(
        table.column(0),
        vec!["VX-02", "VX-04", "VX-19", "VX-05", "VX-33"]
    );
}

#[test]
fn test_search_hides_exactly_non_matching_rows() {
    let mut table = usage_table();

    let visible = table::search(&mut table, "vx-0");
    assert_eq!(visible, 3);
    for row in &table.rows {
        let matches = row.text().to_lowercase().contains("vx-0");
        assert_eq!(row.hidden, !matches);
    }

    assert_eq!(table::search(&mut table, ""), 5);
}

#[test]
fn test_sort_keeps_hidden_rows() {
    let mut table = usage_table();
    table::search(&mut table, "dung");
    table::sort(&mut table, 2).unwrap();

    assert_eq!(table.rows.len(), 5);
    assert_eq!(table.visible_rows().count(), 1);
}

#[test]
fn test_page_level_search_and_sort() {
    let mut page = Page::new("/admin/keys");
    page.add_table(usage_table());
    page.set_text(DEFAULT_COUNTER_ID, "5");

    assert_eq!(page.search_table(DEFAULT_TABLE_ID, "2025").unwrap(), 2);
    assert_eq!(page.text(DEFAULT_COUNTER_ID), Some("2"));

    assert_eq!(page.sort_table(DEFAULT_TABLE_ID, 0).unwrap(), SortDirection::Asc);
    assert_eq!(page.table(DEFAULT_TABLE_ID).unwrap().column(0)[0], "VX-02");
}
