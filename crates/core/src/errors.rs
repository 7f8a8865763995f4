//! Error types for the markfix core library.
//!
//! A single [`EditError`] enum derived with `thiserror` covers the file
//! phases (read, backup, write). Transformations themselves are total and
//! report outcomes through their own result types rather than errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or committing a document.
#[derive(Debug, Error)]
pub enum EditError {
    /// The target file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transformed document could not be written back.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pre-write backup copy could not be created.
    #[error("failed to back up '{path}' to '{backup_path}': {source}")]
    Backup {
        path: PathBuf,
        backup_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = EditError::Read {
            path: PathBuf::from("/tmp/missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("failed to read '/tmp/missing.txt'"));

        let err = EditError::Backup {
            path: PathBuf::from("a.txt"),
            backup_path: PathBuf::from("a.txt.bak"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("a.txt.bak"));
    }
}
