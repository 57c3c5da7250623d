use thiserror::Error;

/// Fatal conditions for an ingestion or export attempt.
///
/// Row-level problems are not errors; see [`crate::validate::Rejection`].
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("missing required columns in CSV file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("the CSV file is empty or contains no valid order data")]
    NoValidData,

    #[error("failed to parse CSV file: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        // A csv error wrapping a plain I/O failure is still an I/O failure.
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => ReportError::Io(io),
                other => ReportError::Parse(format!("{:?}", other)),
            }
        } else {
            ReportError::Parse(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
