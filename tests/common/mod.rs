//! Shared fixtures for the integration tests: workbook builders over the
//! standard header row.

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// Header row of the intake sheet, in column order.
pub const HEADERS: [&str; 13] = [
    "受注番号",
    "受注日",
    "顧客コード",
    "顧客名",
    "商品コード",
    "商品名",
    "数量",
    "単価",
    "金額",
    "納期",
    "配送先住所",
    "配送先電話番号",
    "備考",
];

/// One intake row with the five core columns filled and plausible
/// values for the rest.
pub fn text_row(number: &str, date: &str, customer: &str, product: &str, qty: &str) -> Vec<String> {
    vec![
        number.to_string(),
        date.to_string(),
        "C001".to_string(),
        customer.to_string(),
        "P001".to_string(),
        product.to_string(),
        qty.to_string(),
        "1980".to_string(),
        "19800".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

/// Writes a workbook whose first sheet carries the header row followed
/// by the given data rows as text cells. Empty values stay unwritten,
/// the way hand-edited sheets arrive.
pub fn write_workbook(path: &Path, rows: &[Vec<String>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .expect("write header cell");
    }
    for (index, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(index as u32 + 1, col as u16, value)
                    .expect("write data cell");
            }
        }
    }

    workbook.save(path).expect("save workbook");
}
