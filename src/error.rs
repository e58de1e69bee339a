//! Error types for vitric

use thiserror::Error;

/// Result type alias for workbench operations
pub type Result<T> = std::result::Result<T, WorkbenchError>;

/// Workbench error types
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workspace root is not a directory: {0}")]
    NotADirectory(String),
}
