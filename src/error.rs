//! Error types shared by the depreciation, cash flow and reporting layers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EconomicsError {
    #[error("Sequence length mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Sequence {what} too short: need at least 3 periods, got {len}")]
    SequenceTooShort { what: &'static str, len: usize },

    #[error("Unknown depreciation method: {0} (use SOYD or DDB)")]
    UnknownMethod(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EconomicsResult<T> = Result<T, EconomicsError>;
