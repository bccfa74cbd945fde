//! Error types for footer metadata extraction.
//!
//! Two families share one enum. Resolution errors (`NotFound`, `NotADirectory`,
//! the empty-result variants, `InvalidInputType`) and `ThreadPool` abort a batch
//! before any document is opened. Everything else describes a single document
//! and ends up as the message of that file's error result.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while resolving inputs or reading footers.
///
/// # Examples
///
/// ```rust
/// use docfoot_core::{resolve, DocfootError, InputSource};
///
/// match resolve(&InputSource::folder("/definitely/not/here")) {
///     Err(DocfootError::NotFound(path)) => eprintln!("missing: {}", path.display()),
///     Err(e) if e.is_empty_result() => eprintln!("nothing to do: {e}"),
///     Err(e) => eprintln!("failed: {e}"),
///     Ok(files) => println!("{} files", files.len()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocfootError {
    /// The folder given as input does not exist.
    #[error("Folder not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The folder given as input exists but is not a directory.
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The folder contains no `.docx` files.
    #[error("No .docx files found in folder: {}", .0.display())]
    NoDocuments(PathBuf),

    /// The explicit file list is empty.
    #[error("File list is empty")]
    EmptyFileList,

    /// Every entry of the explicit file list was skipped.
    #[error("No valid .docx files found in the provided list")]
    NoValidFiles,

    /// Loosely-typed input was neither a folder path nor a list of paths.
    ///
    /// Carries a short description of what was received instead.
    #[error("Input must be either a folder path (string) or list of file paths, got {0}")]
    InvalidInputType(String),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A part the document references is absent from the container.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// The container or one of its XML parts could not be read.
    #[error("Backend error: {0}")]
    BackendError(String),
}

impl DocfootError {
    /// Whether this is one of the "nothing to process" resolution errors.
    #[inline]
    #[must_use = "classifies the error without consuming it"]
    pub const fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::NoDocuments(_) | Self::EmptyFileList | Self::NoValidFiles
        )
    }
}

/// Result type for footer extraction operations
pub type Result<T> = std::result::Result<T, DocfootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = DocfootError::NotFound(PathBuf::from("/data/reports"));
        assert_eq!(format!("{error}"), "Folder not found: /data/reports");
    }

    #[test]
    fn test_not_a_directory_display() {
        let error = DocfootError::NotADirectory(PathBuf::from("notes.txt"));
        assert_eq!(format!("{error}"), "Path is not a directory: notes.txt");
    }

    #[test]
    fn test_empty_result_variants() {
        assert!(DocfootError::NoDocuments(PathBuf::from(".")).is_empty_result());
        assert!(DocfootError::EmptyFileList.is_empty_result());
        assert!(DocfootError::NoValidFiles.is_empty_result());
        assert!(!DocfootError::NotFound(PathBuf::from(".")).is_empty_result());
        assert!(!DocfootError::BackendError("bad zip".to_string()).is_empty_result());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DocfootError = io_err.into();

        match err {
            DocfootError::IoError(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_error_size() {
        let size = std::mem::size_of::<DocfootError>();
        assert!(
            size < 128,
            "DocfootError size is {size} bytes, consider boxing large variants"
        );
    }
}
