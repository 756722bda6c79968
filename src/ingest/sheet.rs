use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::errors::ServiceError;

use super::row::RawOrderRow;

/// Reads the data rows of the first worksheet.
///
/// The first row of the used range is the header row; each data cell is
/// routed to its field by header label. Rows with no cell values at all
/// are skipped. A workbook without sheets or rows decodes as empty.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<RawOrderRow>, ServiceError> {
    let path = path.as_ref();
    check_extension(path)?;

    let mut workbook = open_workbook_auto(path)?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let rows = rows_from_range(&range);
    debug!(
        sheet = %sheet_name,
        rows = rows.len(),
        "decoded upload worksheet"
    );
    Ok(rows)
}

/// Only `.xlsx` and `.xls` uploads are accepted.
fn check_extension(path: &Path) -> Result<(), ServiceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xls" => Ok(()),
        _ => Err(ServiceError::UnsupportedFileType(extension)),
    }
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawOrderRow> {
    let mut row_iter = range.rows();
    let Some(header_cells) = row_iter.next() else {
        return Vec::new();
    };
    let headers: Vec<Option<String>> = header_cells.iter().map(cell_text).collect();

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row = RawOrderRow::default();
        let mut has_value = false;
        for (header, cell) in headers.iter().zip(cells) {
            let Some(label) = header.as_deref() else {
                continue;
            };
            if let Some(text) = cell_text(cell) {
                has_value = true;
                row.set(label, text);
            }
        }
        if has_value {
            rows.push(row);
        }
    }
    rows
}

/// Canonical text of one cell. Dates become `YYYY-MM-DD`, integral
/// floats print without a fractional part, empty and error cells are
/// absent.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().format("%Y-%m-%d").to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
