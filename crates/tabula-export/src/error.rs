use thiserror::Error;

/// Failure of one of the encoders.
///
/// Only the `try_*` entry points return these; the best-effort entry points log them and
/// degrade instead.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("delimited text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spreadsheet column {0} is out of range")]
    ColumnOutOfRange(usize),
    #[error("spreadsheet row {0} is out of range")]
    RowOutOfRange(usize),
}
