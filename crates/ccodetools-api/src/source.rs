//! Source reader shared by every backend.
//!
//! Files are read in full, decoded as UTF-8 and split on `\n` only. A CRLF
//! file keeps its `\r` at the end of each line; the scanners trim it away
//! where they strip whitespace.

use crate::errors::{AnalyzerError, AnalyzerResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Decoded contents of one C source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
}

impl SourceFile {
    /// Read and decode `path`.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::IoError`] if the file cannot be read and
    /// [`AnalyzerError::DecodeError`] if it is not UTF-8.
    pub fn read(path: &Path) -> AnalyzerResult<Self> {
        let bytes = read_bytes(path)?;
        Self::from_bytes(path, bytes)
    }

    /// Decode bytes that were already read from `path`
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> AnalyzerResult<Self> {
        let text =
            String::from_utf8(bytes).map_err(|e| AnalyzerError::DecodeError(path.to_path_buf(), e))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Build a source file from in-memory text
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Lines of the file; index `n` holds line `n + 1`.
    ///
    /// A trailing newline produces a final empty line.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    /// Slice of the text between two byte offsets, if both fall on char
    /// boundaries inside the file
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }
}

/// Read the raw bytes of a file, mapping failures to [`AnalyzerError::IoError`]
pub fn read_bytes(path: &Path) -> AnalyzerResult<Vec<u8>> {
    fs::read(path).map_err(|e| AnalyzerError::IoError(path.to_path_buf(), e))
}
