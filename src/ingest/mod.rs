//! Spreadsheet ingestion pipeline: workbook decode, typed rows,
//! row validation, and normalization into order records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod normalize;
pub mod row;
pub mod sheet;
pub mod validate;

pub use normalize::normalize_row;
pub use row::RawOrderRow;
pub use validate::{validate_row, RowFailure};

/// Hard ceiling on rows per uploaded file. Exceeding it aborts the
/// whole batch before any row is processed.
pub const MAX_BATCH_ROWS: usize = 1000;

/// Parses cell text as a number the way the order columns expect.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Parses cell text as a calendar date. Accepts `YYYY-MM-DD` and
/// `YYYY/M/D` with one- or two-digit month and day.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
