use std::path::PathBuf;
use thiserror::Error;

pub type SvevalResult<T> = std::result::Result<T, SvevalError>;

#[derive(Debug, Error)]
pub enum SvevalError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Variant type missing, expected one of DEL, INS")]
    MissingVarType,
    #[error("Unsupported variant type: {value}")]
    UnsupportedVarType { value: String },
    #[error("Missing column: {column}")]
    MissingColumn { column: String },
    #[error("Table {} lacks the two-row group/column header", path.display())]
    MissingHeader { path: PathBuf },
    #[error("Table {} has no columns in group {group}", path.display())]
    MissingGroup { path: PathBuf, group: String },
    #[error("Invalid value '{value}' for column {column} at line {line}")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
    },
    #[error("Probability must be > 0, got {prob}")]
    InvalidProbability { prob: f64 },
    #[error("Cannot compute recall against an empty truth set")]
    EmptyTruthSet,
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl SvevalError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

#[macro_export]
macro_rules! sveval_error {
    ($($arg:tt)*) => {
        $crate::error::SvevalError::message(format!($($arg)*))
    };
}
