use crate::domain::model::{Row, Table};
use crate::domain::ports::DownloadTarget;
use crate::utils::error::Result;
use std::io::Read;
use std::path::PathBuf;

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
pub const DEFAULT_EXPORT_FILENAME: &str = "keys.csv";

/// 含逗號或引號的欄位才加引號，內部引號加倍
pub fn escape_field(cell: &str) -> String {
    let text = cell.trim();
    if text.contains(',') || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn render_row(row: &Row) -> String {
    row.cells
        .iter()
        .map(|cell| escape_field(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the header and every body row in their current order.
/// Hidden rows are included; there is no trailing newline.
pub fn render_csv(table: &Table) -> String {
    table
        .header
        .iter()
        .chain(table.rows.iter())
        .map(render_row)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Delivers the CSV rendering of `table` to `target`.
///
/// Returns `Ok(None)` without producing anything when the target cannot
/// take downloads.
pub async fn export<T: DownloadTarget>(
    table: &Table,
    filename: &str,
    target: &T,
) -> Result<Option<PathBuf>> {
    if !target.supports_download() {
        tracing::debug!(table = %table.id, "download not supported, skipping export");
        return Ok(None);
    }

    let content = render_csv(table);
    let location = target
        .save(filename, CSV_MIME_TYPE, content.as_bytes())
        .await?;

    tracing::info!(
        "📁 Exported {} rows from '{}' to {}",
        table.rows.len(),
        table.id,
        location.display()
    );

    Ok(Some(location))
}

/// Loads a table from CSV text; the first record becomes the header.
pub fn import_csv<R: Read>(table_id: &str, reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = Table::new(table_id);
    for (index, record) in csv_reader.records().enumerate() {
        let row = Row::new(record?.iter());
        if index == 0 {
            table.header = Some(row);
        } else {
            table.rows.push(row);
        }
    }

    tracing::debug!(table = %table_id, rows = table.rows.len(), "table imported from CSV");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("  padded  "), "padded");
        assert_eq!(escape_field("1,000"), "\"1,000\"");
        assert_eq!(escape_field("He said \"hi\""), "\"He said \"\"hi\"\"\"");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_render_csv_with_header_and_hidden_rows() {
        let mut table = Table::new("keysTable")
            .with_header(["A", "B"])
            .with_rows([["1,000", "He said \"hi\""], ["2", "x"]]);
        table.rows[1].hidden = true;

        assert_eq!(
            render_csv(&table),
            "A,B\n\"1,000\",\"He said \"\"hi\"\"\"\n2,x"
        );
    }

    #[test]
    fn test_render_csv_without_header() {
        let table = Table::new("t").with_rows([["a"], ["b"]]);
        assert_eq!(render_csv(&table), "a\nb");
        assert_eq!(render_csv(&Table::new("empty")), "");
    }

    #[test]
    fn test_import_csv() {
        let data = "Key,Module,Usage\nK-1,voice,3\n\"K,2\",image,10\n";
        let table = import_csv("keysTable", data.as_bytes()).unwrap();

        assert_eq!(table.header, Some(Row::new(["Key", "Module", "Usage"])));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells[0], "K,2");
    }
}
