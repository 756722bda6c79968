use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::ingest::{normalize_row, sheet, validate_row, RawOrderRow, RowFailure, MAX_BATCH_ROWS};
use crate::repositories::OrderStore;

/// Outcome of one upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows persisted.
    pub accepted: usize,
    /// Rows excluded by validation.
    pub rejected: usize,
    /// Every failure in row order; one row can contribute several.
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    /// Operator-facing summary of the batch.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "成功: {}件\nエラー: {}件",
            self.accepted,
            self.failures.len()
        );
        for failure in &self.failures {
            let _ = write!(out, "\n{}行目: {}", failure.row, failure.message);
        }
        out
    }
}

/// Service orchestrating the ingestion flow: decode the workbook,
/// validate and normalize every row, append the accepted rows.
#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn OrderStore>,
}

impl ImportService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Runs the whole ingestion flow for one uploaded workbook.
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub fn upload(&self, path: &Path) -> Result<ImportReport, ServiceError> {
        let rows = sheet::read_rows(path)?;
        self.process(rows)
    }

    /// Validates and normalizes a batch of raw rows.
    ///
    /// Every row is processed independently; accepted rows are appended
    /// to the collection in one write even when other rows failed. A
    /// batch over the row ceiling aborts with nothing persisted.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn process(&self, rows: Vec<RawOrderRow>) -> Result<ImportReport, ServiceError> {
        if rows.len() > MAX_BATCH_ROWS {
            warn!(rows = rows.len(), limit = MAX_BATCH_ROWS, "upload exceeds row ceiling");
            return Err(ServiceError::RowLimitExceeded(rows.len()));
        }

        // Uniqueness is checked against the collection as of batch
        // start; rows inside the batch do not see each other.
        let existing: HashSet<String> = self
            .store
            .list()?
            .into_iter()
            .map(|order| order.order_number)
            .collect();

        let mut accepted = Vec::new();
        let mut rejected = 0usize;
        let mut failures = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            // Rows as the operator sees them: data starts under the header
            let row_number = (index + 2) as u32;

            let row_failures = validate_row(row, row_number, &existing);
            if !row_failures.is_empty() {
                rejected += 1;
                failures.extend(row_failures);
                continue;
            }

            match normalize_row(row) {
                Some(order) => accepted.push(order),
                None => {
                    rejected += 1;
                    failures.push(RowFailure {
                        row: row_number,
                        message: "受注日の形式が正しくありません".to_string(),
                    });
                }
            }
        }

        let accepted_count = accepted.len();
        if !accepted.is_empty() {
            self.store.append(accepted)?;
        }

        info!(
            accepted = accepted_count,
            rejected,
            failures = failures.len(),
            "processed upload batch"
        );

        Ok(ImportReport {
            accepted: accepted_count,
            rejected,
            failures,
        })
    }
}
