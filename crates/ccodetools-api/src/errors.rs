use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors that can occur while analyzing a C source file
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// File content is not valid UTF-8
    #[error("File {0} is not valid UTF-8: {1}")]
    DecodeError(PathBuf, #[source] FromUtf8Error),

    /// The backend could not produce a tree for the file
    #[error("Parse error in {0}: {1}")]
    ParseError(PathBuf, String),

    /// The tree-sitter grammar could not be loaded
    #[error("Failed to load C grammar: {0}")]
    LanguageError(String),

    /// The backend's native dependency is missing or was not initialized
    #[error("Backend '{backend}' is unavailable: {message}")]
    BackendUnavailable { backend: String, message: String },

    /// Unknown backend name in configuration
    #[error("Analyzer '{0}' not supported (available: tree-sitter, clang)")]
    UnsupportedBackend(String),

    /// Malformed configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyzerError {
    pub fn unavailable(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

/// Result type for analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
