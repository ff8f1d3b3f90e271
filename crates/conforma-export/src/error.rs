//! Export error types.

use std::path::PathBuf;

/// Errors from building or writing a summary document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output directory does not exist or is not a directory.
    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),
    /// PDF encoding failed.
    #[error("failed to encode PDF: {0}")]
    Pdf(String),
    /// Writing the file failed; nothing was left at the target path.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
