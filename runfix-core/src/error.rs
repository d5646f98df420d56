use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file failures. These are recorded in the batch report rather than
/// aborting the run, unless the caller asked for fail-fast behavior.
#[derive(Debug, Error)]
pub enum RunfixError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid UTF-8", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to write backup {}: {source}", .path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to restore {} from backup: {source}", .path.display())]
    Restore { path: PathBuf, source: io::Error },
}

impl RunfixError {
    /// Classify a read failure, splitting out non-UTF-8 content.
    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            Self::InvalidUtf8 { path }
        } else {
            Self::Read { path, source }
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. }
            | Self::InvalidUtf8 { path }
            | Self::Backup { path, .. }
            | Self::Write { path, .. }
            | Self::Restore { path, .. } => path,
        }
    }
}
