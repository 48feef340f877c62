//! Process-wide libclang runtime

use ccodetools_api::{AnalyzerError, AnalyzerResult};
use clang::Clang;
use log::info;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::parser_impl::BACKEND_NAME;

/// Environment variable consulted by the libclang loader
pub const LIBCLANG_PATH: &str = "LIBCLANG_PATH";

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Loaded libclang library
///
/// Created once per process by the composition layer through
/// [`ClangRuntime::initialize`]. Every [`ClangAnalyzer`](crate::ClangAnalyzer)
/// borrows it, so the library stays loaded while any analyzer exists.
pub struct ClangRuntime {
    clang: Clang,
}

impl ClangRuntime {
    /// Load libclang, optionally from `library_path`
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::BackendUnavailable`] when the library cannot be
    /// loaded, or when a runtime was already initialized in this process.
    pub fn initialize(library_path: Option<&Path>) -> AnalyzerResult<Self> {
        if INITIALIZED.swap(true, Ordering::SeqCst) {
            return Err(AnalyzerError::unavailable(
                BACKEND_NAME,
                "libclang runtime is already initialized in this process",
            ));
        }

        if let Some(path) = library_path {
            env::set_var(LIBCLANG_PATH, path);
        }

        match Clang::new() {
            Ok(clang) => {
                match library_path {
                    Some(path) => info!("libclang loaded from {}", path.display()),
                    None => info!("libclang loaded from the system search path"),
                }
                Ok(Self { clang })
            }
            Err(message) => {
                // A failed load may be retried with another path
                INITIALIZED.store(false, Ordering::SeqCst);
                Err(AnalyzerError::unavailable(BACKEND_NAME, message))
            }
        }
    }

    pub fn clang(&self) -> &Clang {
        &self.clang
    }
}

impl std::fmt::Debug for ClangRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClangRuntime").finish_non_exhaustive()
    }
}
