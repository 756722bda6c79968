/// Column labels of the upload sheet. The header row must use these
/// exact Japanese labels; unknown columns are ignored.
pub mod labels {
    pub const ORDER_NUMBER: &str = "受注番号";
    pub const ORDER_DATE: &str = "受注日";
    pub const CUSTOMER_CODE: &str = "顧客コード";
    pub const CUSTOMER_NAME: &str = "顧客名";
    pub const PRODUCT_CODE: &str = "商品コード";
    pub const PRODUCT_NAME: &str = "商品名";
    pub const QUANTITY: &str = "数量";
    pub const UNIT_PRICE: &str = "単価";
    pub const AMOUNT: &str = "金額";
    pub const DELIVERY_DATE: &str = "納期";
    pub const DELIVERY_ADDRESS: &str = "配送先住所";
    pub const DELIVERY_PHONE: &str = "配送先電話番号";
    pub const REMARKS: &str = "備考";
}

/// One data row of the upload sheet, decoded into explicit fields.
///
/// `None` means the cell was absent; whitespace-only text is kept as-is
/// and treated as blank by the presence checks downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrderRow {
    pub order_number: Option<String>,
    pub order_date: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub amount: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_phone: Option<String>,
    pub remarks: Option<String>,
}

impl RawOrderRow {
    /// Routes a cell to its field by header label. Cells under unknown
    /// headers are dropped.
    pub fn set(&mut self, label: &str, value: String) {
        match label {
            labels::ORDER_NUMBER => self.order_number = Some(value),
            labels::ORDER_DATE => self.order_date = Some(value),
            labels::CUSTOMER_CODE => self.customer_code = Some(value),
            labels::CUSTOMER_NAME => self.customer_name = Some(value),
            labels::PRODUCT_CODE => self.product_code = Some(value),
            labels::PRODUCT_NAME => self.product_name = Some(value),
            labels::QUANTITY => self.quantity = Some(value),
            labels::UNIT_PRICE => self.unit_price = Some(value),
            labels::AMOUNT => self.amount = Some(value),
            labels::DELIVERY_DATE => self.delivery_date = Some(value),
            labels::DELIVERY_ADDRESS => self.delivery_address = Some(value),
            labels::DELIVERY_PHONE => self.delivery_phone = Some(value),
            labels::REMARKS => self.remarks = Some(value),
            _ => {}
        }
    }

    /// True when no cell in the row carried a value.
    pub fn is_empty(&self) -> bool {
        self == &RawOrderRow::default()
    }

    /// The fields that must be present for a row to be accepted, in
    /// reporting order.
    pub(crate) fn required_fields(&self) -> [(&'static str, &Option<String>); 5] {
        [
            (labels::ORDER_NUMBER, &self.order_number),
            (labels::ORDER_DATE, &self.order_date),
            (labels::CUSTOMER_NAME, &self.customer_name),
            (labels::PRODUCT_NAME, &self.product_name),
            (labels::QUANTITY, &self.quantity),
        ]
    }
}

/// Presence means non-blank after trimming.
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// The trimmed value, when present.
pub(crate) fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_routes_known_labels() {
        let mut row = RawOrderRow::default();
        row.set(labels::ORDER_NUMBER, "ORD-1".to_string());
        row.set(labels::QUANTITY, "10".to_string());
        row.set("知らない列", "値".to_string());

        assert_eq!(row.order_number.as_deref(), Some("ORD-1"));
        assert_eq!(row.quantity.as_deref(), Some("10"));
        assert!(row.customer_name.is_none());
    }

    #[test]
    fn empty_row_detection() {
        assert!(RawOrderRow::default().is_empty());

        let mut row = RawOrderRow::default();
        row.set(labels::REMARKS, "  ".to_string());
        assert!(!row.is_empty());
    }

    #[test]
    fn presence_ignores_whitespace() {
        assert!(!present(&None));
        assert!(!present(&Some("   ".to_string())));
        assert!(present(&Some("0".to_string())));
        assert!(present(&Some(" x ".to_string())));
    }

    #[test]
    fn trimmed_strips_and_filters() {
        assert_eq!(trimmed(&Some("  ORD-1  ".to_string())), Some("ORD-1"));
        assert_eq!(trimmed(&Some("   ".to_string())), None);
        assert_eq!(trimmed(&None), None);
    }
}
