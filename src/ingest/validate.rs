use std::collections::HashSet;

use serde::Serialize;

use super::row::{present, trimmed, RawOrderRow};
use super::{parse_date, parse_decimal};

/// One validation failure, tagged with the spreadsheet row it came
/// from. Row numbers are as the operator sees them in the sheet, so
/// the first data row is 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: u32,
    pub message: String,
}

impl RowFailure {
    fn new(row: u32, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

/// Checks one raw row against the ingestion rules.
///
/// All rules are applied independently and every failure is collected;
/// a row missing three fields reports three failures. `existing` is the
/// set of order numbers persisted when the batch started.
pub fn validate_row(
    row: &RawOrderRow,
    row_number: u32,
    existing: &HashSet<String>,
) -> Vec<RowFailure> {
    let mut failures = Vec::new();

    for (label, value) in row.required_fields() {
        if !present(value) {
            failures.push(RowFailure::new(
                row_number,
                format!("{label}は必須項目です"),
            ));
        }
    }

    if let Some(order_number) = trimmed(&row.order_number) {
        if existing.contains(order_number) {
            failures.push(RowFailure::new(
                row_number,
                format!("受注番号「{order_number}」は既に登録されています"),
            ));
        }
    }

    if let Some(quantity) = trimmed(&row.quantity) {
        if parse_decimal(quantity).is_none() {
            failures.push(RowFailure::new(row_number, "数量は数値で入力してください"));
        }
    }

    if let Some(order_date) = trimmed(&row.order_date) {
        if parse_date(order_date).is_none() {
            failures.push(RowFailure::new(
                row_number,
                "受注日の形式が正しくありません",
            ));
        }
    }

    failures
}
