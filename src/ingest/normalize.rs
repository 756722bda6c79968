use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entities::{Order, ShippingStatus};

use super::row::{trimmed, RawOrderRow};
use super::{parse_date, parse_decimal};

/// Maps an accepted raw row into a canonical order record.
///
/// Textual fields are trimmed and default to empty; quantity, unit
/// price, and amount coerce to numbers with zero as the fallback; the
/// delivery date silently becomes absent when unparseable. The order
/// date is the one field without a loose fallback: rows reach this
/// function after validation, so it always parses, and a row that
/// somehow arrives without one maps to `None`.
pub fn normalize_row(row: &RawOrderRow) -> Option<Order> {
    let order_date = trimmed(&row.order_date).and_then(parse_date)?;

    Some(Order {
        id: Uuid::new_v4(),
        order_number: text(&row.order_number),
        order_date,
        customer_code: text(&row.customer_code),
        customer_name: text(&row.customer_name),
        product_code: text(&row.product_code),
        product_name: text(&row.product_name),
        quantity: number(&row.quantity),
        unit_price: number(&row.unit_price),
        amount: number(&row.amount),
        delivery_date: trimmed(&row.delivery_date).and_then(parse_date),
        delivery_address: text(&row.delivery_address),
        delivery_phone: text(&row.delivery_phone),
        shipping_status: ShippingStatus::Unshipped,
        shipping_date: None,
        remarks: text(&row.remarks),
        created_at: Utc::now(),
    })
}

/// Trimmed text, empty when the cell was absent.
fn text(value: &Option<String>) -> String {
    trimmed(value).unwrap_or_default().to_string()
}

/// Numeric coercion with zero fallback. Looser than the validator's
/// numeric rule: unit price and amount are never validated, so bad
/// values turn into zero here instead of failing the row.
fn number(value: &Option<String>) -> Decimal {
    trimmed(value).and_then(parse_decimal).unwrap_or_default()
}
