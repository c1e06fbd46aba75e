//! Error types for folder organization.
//!
//! Fatal errors abort a run and surface to the caller as [`OrganizeError`].
//! Archive and cleanup failures are expected and never abort a run; they are
//! collected as [`crate::report::Issue`] values instead.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an organization run.
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// The root path is missing or not a directory. Raised before any mutation.
    #[error("Invalid root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// A directory could not be listed during the scan.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create a category or extraction directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to move a file into its category directory.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Failed to delete an archive after a successful extraction.
    #[error("Failed to remove {}: {source}", path.display())]
    FileRemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filter rules did not compile.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Reasons an archive could not be unpacked.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported or unrecognized archive format")]
    UnsupportedFormat,

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
