use thiserror::Error;

/// Crate-wide error type for the order services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("row limit exceeded: batch has {0} rows")]
    RowLimitExceeded(usize),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    /// Returns the message shown to the operator.
    /// This is the single source of truth for user-facing error text.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFileType(_) => {
                "Excelファイル（.xlsx, .xls）を選択してください".to_string()
            }
            Self::RowLimitExceeded(_) => "一度に処理できるデータは1000件までです".to_string(),
            Self::Workbook(_) => "Excelファイルの読み込みに失敗しました".to_string(),
            Self::Io(_) => "ファイルの読み込みに失敗しました".to_string(),
            // Anything else surfaces as a generic alert with the cause attached
            _ => format!("エラーが発生しました: {}", self),
        }
    }

    /// File-shape failures abort the whole upload and persist nothing.
    pub fn is_file_shape(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType(_) | Self::Workbook(_) | Self::RowLimitExceeded(_)
        )
    }
}
