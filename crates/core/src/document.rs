//! In-memory document model and the read / commit phases.
//!
//! A [`Document`] is an ordered sequence of lines, each retaining its
//! terminating newline (if any). The whole file is read up front, the
//! transformation builds a new `Document`, and [`Document::commit`] writes it
//! back as a distinct final phase -- there is no in-place mutation and no
//! interleaving of reads and writes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::EditError;

// ---------------------------------------------------------------------------
// WriteMode
// ---------------------------------------------------------------------------

/// How the commit phase writes the transformed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the target file in place. No backup is retained.
    InPlace,
    /// Write nothing; the caller reports what would have changed.
    DryRun,
    /// Copy the target to `<file>.bak`, then overwrite it.
    Backup,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An ordered sequence of lines read fully into memory.
///
/// Lines keep their `\n` terminators, so concatenating the lines reproduces
/// the original content byte for byte. A final line without a trailing
/// newline is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split raw content into a document, preserving line terminators.
    pub fn from_content(content: &str) -> Self {
        let lines = content.split_inclusive('\n').map(str::to_string).collect();
        Self { lines }
    }

    /// Build a document from an already-split line sequence.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read the file at `path` in full (UTF-8).
    pub fn read(path: &Path) -> Result<Self, EditError> {
        let content = fs::read_to_string(path).map_err(|source| EditError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "document read");
        Ok(Self::from_content(&content))
    }

    /// The document's lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Reassemble the document into a single string.
    pub fn to_content(&self) -> String {
        self.lines.concat()
    }

    /// Commit the document to `path` according to `mode`.
    ///
    /// `DryRun` performs no filesystem access at all. `Backup` copies the
    /// existing file to `<file>.bak` before overwriting; the backup path is
    /// returned so the caller can report it.
    pub fn commit(&self, path: &Path, mode: WriteMode) -> Result<Option<PathBuf>, EditError> {
        match mode {
            WriteMode::DryRun => {
                info!(path = %path.display(), "dry run, not writing");
                Ok(None)
            }
            WriteMode::InPlace => {
                self.write_to(path)?;
                Ok(None)
            }
            WriteMode::Backup => {
                let backup_path = backup_path_for(path);
                fs::copy(path, &backup_path).map_err(|source| EditError::Backup {
                    path: path.to_path_buf(),
                    backup_path: backup_path.clone(),
                    source,
                })?;
                debug!(backup = %backup_path.display(), "backup written");
                self.write_to(path)?;
                Ok(Some(backup_path))
            }
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), EditError> {
        fs::write(path, self.to_content()).map_err(|source| EditError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), lines = self.line_count(), "document written");
        Ok(())
    }
}

/// `<file>.bak` next to the original, keeping the original extension.
fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_bytes() {
        let content = "one\ntwo\nthree\n";
        let doc = Document::from_content(content);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.to_content(), content);
    }

    #[test]
    fn test_missing_final_newline_preserved() {
        let content = "one\ntwo";
        let doc = Document::from_content(content);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.lines()[1], "two");
        assert_eq!(doc.to_content(), content);
    }

    #[test]
    fn test_empty_content() {
        let doc = Document::from_content("");
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.to_content(), "");
    }

    #[test]
    fn test_crlf_lines_kept_opaque() {
        let content = "one\r\ntwo\r\n";
        let doc = Document::from_content(content);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.to_content(), content);
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Document::read(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(EditError::Read { .. })));
    }

    #[test]
    fn test_commit_in_place_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, "old\n").unwrap();

        let doc = Document::from_content("new\n");
        let backup = doc.commit(&path, WriteMode::InPlace).unwrap();
        assert!(backup.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_commit_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, "old\n").unwrap();

        let doc = Document::from_content("new\n");
        doc.commit(&path, WriteMode::DryRun).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_commit_backup_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, "old\n").unwrap();

        let doc = Document::from_content("new\n");
        let backup = doc.commit(&path, WriteMode::Backup).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("file.txt.bak"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "old\n");
    }
}
