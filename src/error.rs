//! Error types for the hexo-source-tool library
//!
//! Errors fall into two groups. Precondition and write failures abort the
//! whole run; per-record failures are collected into a [`Report`] by the
//! orchestrators and the run carries on with the next record.
//!
//! [`Report`]: crate::core::Report

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum SourceToolError {
    /// I/O related errors without a more specific home
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Source directory missing or unreadable
    #[error("Invalid source directory {path}: {reason}")]
    InvalidSourceDir { path: PathBuf, reason: String },

    /// Destination holds entries and no force flag was given
    #[error(
        "destination directory {path} is not empty, if you want to cover it, with --force or -f"
    )]
    DestinationNotEmpty { path: PathBuf },

    /// Destination exists but is a regular file
    #[error("destination {path} is not a directory")]
    DestinationNotDirectory { path: PathBuf },

    /// headers.json missing or not valid JSON
    #[error("Invalid metadata index {path}: {reason}")]
    InvalidIndex { path: PathBuf, reason: String },

    /// Front matter parsing errors
    #[error("Invalid front matter in {path}: {reason}")]
    InvalidFrontMatter { path: PathBuf, reason: String },

    /// A page candidate without index.md
    #[error("\"{path}\" is not a valid page dir: {reason}")]
    InvalidPage { path: PathBuf, reason: String },

    /// An index record that cannot be mapped onto the destination tree
    #[error("Invalid record \"{name}\": {reason}")]
    InvalidRecord { name: String, reason: String },

    /// Body file named by the index is missing from the custom tree
    #[error("Source file not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Reading a source content file failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Asset directory copy failed
    #[error("Failed to copy asset dir {path}: {reason}")]
    AssetCopy { path: PathBuf, reason: String },

    /// Version-control history lookup failed or came back empty
    #[error("No history for {path}: {reason}")]
    HistoryUnavailable { path: PathBuf, reason: String },

    /// Writing an output file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SourceToolError>;

impl SourceToolError {
    /// Create a new invalid source directory error
    pub fn invalid_source_dir(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSourceDir {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new destination not empty error
    pub fn destination_not_empty(path: impl Into<PathBuf>) -> Self {
        Self::DestinationNotEmpty { path: path.into() }
    }

    /// Create a new destination not a directory error
    pub fn destination_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::DestinationNotDirectory { path: path.into() }
    }

    /// Create a new invalid index error
    pub fn invalid_index(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidIndex {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid page error
    pub fn invalid_page(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid record error
    pub fn invalid_record(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new source missing error
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        Self::SourceMissing { path: path.into() }
    }

    /// Wrap a read failure with the offending path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a new asset copy error
    pub fn asset_copy(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::AssetCopy {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new history unavailable error
    pub fn history_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::HistoryUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a write failure with the offending path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Check if this error only affects a single record.
    ///
    /// Recoverable errors are logged and skipped by the orchestrators; all
    /// other errors abort the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidFrontMatter { .. }
            | Self::InvalidPage { .. }
            | Self::InvalidRecord { .. }
            | Self::SourceMissing { .. }
            | Self::Read { .. }
            | Self::AssetCopy { .. }
            | Self::HistoryUnavailable { .. } => true,
            Self::Io(_)
            | Self::Regex(_)
            | Self::InvalidSourceDir { .. }
            | Self::DestinationNotEmpty { .. }
            | Self::DestinationNotDirectory { .. }
            | Self::InvalidIndex { .. }
            | Self::Write { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SourceToolError::invalid_front_matter("a.md", "missing colon");
        assert!(matches!(err, SourceToolError::InvalidFrontMatter { .. }));
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Invalid front matter in a.md: missing colon"
        );
    }

    #[test]
    fn test_precondition_errors_are_fatal() {
        assert!(!SourceToolError::destination_not_empty("out").is_recoverable());
        assert!(!SourceToolError::invalid_index("headers.json", "eof").is_recoverable());
        assert!(!SourceToolError::invalid_source_dir("src", "missing").is_recoverable());
    }

    #[test]
    fn test_write_errors_are_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = SourceToolError::write("out/a.md", io);
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_history_errors_are_recoverable() {
        let err = SourceToolError::history_unavailable("_posts/a.md", "empty log");
        assert!(err.is_recoverable());
    }
}
