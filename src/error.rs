use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid trade data: {0}")]
    ParseError(String),

    #[error("CSV export failed: {0}")]
    CsvError(String),

    #[error("Invalid trade {id}: {reason}")]
    ValidationError { id: String, reason: String },

    #[error("Invalid settings: {0}")]
    SettingsError(String),
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::ParseError(err.to_string())
    }
}

impl From<csv::Error> for HistoryError {
    fn from(err: csv::Error) -> Self {
        HistoryError::CsvError(err.to_string())
    }
}
