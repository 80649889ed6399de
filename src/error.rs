use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[cfg(feature = "ocr")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No such record: {0}")]
    UnknownRecord(String),

    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ClaimsError>;
