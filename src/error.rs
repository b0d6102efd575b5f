use std::path::PathBuf;
use thiserror::Error;

/// Result type for broadsheet extraction
pub type Result<T> = std::result::Result<T, BroadsheetError>;

/// Errors that abort the extraction of a workbook
#[derive(Debug, Error)]
pub enum BroadsheetError {
    /// The workbook or one of its worksheets could not be read
    #[error("Unable to load workbook {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// A subject was registered without one of its three score columns
    #[error("schema inconsistency for subject {subject}: missing {field} column")]
    SchemaInconsistency { subject: String, field: &'static str },

    /// The scan configuration file is invalid
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
