use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A persisted index file or the corpus file violates the expected
    /// line layout. Fatal for the whole load; no partial index is kept.
    #[error("{path}:{line}: {reason}")]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn format(path: &std::path::Path, line: usize, reason: impl Into<String>) -> Self {
        Error::Format {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}
