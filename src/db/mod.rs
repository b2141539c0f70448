use std::io;
use std::path::PathBuf;

pub mod question_store;
pub mod user_store;

pub use question_store::{QuestionStore, Table};
pub use user_store::UserStore;

/// Failures of the file-backed stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed credential file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Question nr {0} already exists")]
    DuplicateNr(u32),

    #[error("No question nr left to assign")]
    NrExhausted,
}

impl StoreError {
    fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
