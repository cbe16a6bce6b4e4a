//! Row sorting, substring search and predicate filtering over a [`Table`].

use crate::domain::model::{Row, SortDirection, Table};
use crate::utils::error::{DashError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("leading number pattern is valid")
});

/// Parses the longest numeric prefix of `text`, the way `parseFloat` reads a cell.
///
/// `"12 keys"` gives 12, `"1,000"` gives 1 and `"abc"` gives `None`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let matched = LEADING_NUMBER.find(text)?.as_str();
    match matched.trim_start_matches(['+', '-']) {
        "Infinity" if matched.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => matched.parse().ok(),
    }
}

/// 兩邊都是數字就比數值，否則以不分大小寫的文字順序比較
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());

    if let (Some(x), Some(y)) = (parse_leading_number(a), parse_leading_number(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    compare_text(a, b)
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        // lowercase sorts before uppercase when the letters match
        .then_with(|| b.cmp(a))
}

/// Stable sort of `rows` by the cell at `column`.
///
/// Every row must have the column; otherwise nothing moves.
pub fn sort_rows(rows: &mut [Row], column: usize, direction: SortDirection) -> Result<()> {
    if let Some(short) = rows.iter().find(|row| row.cells.len() <= column) {
        return Err(DashError::ColumnOutOfRange {
            column,
            cells: short.cells.len(),
        });
    }

    rows.sort_by(|a, b| {
        let cmp = compare_cells(&a.cells[column], &b.cells[column]);
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });

    Ok(())
}

/// Sorts the table and flips its direction: first call ascending, then
/// descending, and so on. Hidden rows are sorted along with the rest.
pub fn sort(table: &mut Table, column: usize) -> Result<SortDirection> {
    let direction = match table.sort_direction {
        Some(SortDirection::Asc) => SortDirection::Desc,
        _ => SortDirection::Asc,
    };

    sort_rows(&mut table.rows, column, direction)?;
    table.sort_direction = Some(direction);

    tracing::debug!(
        table = %table.id,
        column,
        direction = ?direction,
        rows = table.rows.len(),
        "table sorted"
    );

    Ok(direction)
}

/// Shows rows whose text contains `term` (case-insensitive) and hides the rest.
/// Returns the number of visible rows.
pub fn search(table: &mut Table, term: &str) -> usize {
    let needle = term.to_lowercase();
    filter(table, |row| row.text().to_lowercase().contains(&needle))
}

/// 依照呼叫端提供的條件顯示或隱藏每一列
pub fn filter<F>(table: &mut Table, mut predicate: F) -> usize
where
    F: FnMut(&Row) -> bool,
{
    for row in table.rows.iter_mut() {
        row.hidden = !predicate(row);
    }
    visible_count(table)
}

pub fn visible_count(table: &Table) -> usize {
    table.visible_rows().count()
}
