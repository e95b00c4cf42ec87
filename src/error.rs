//! Error types and handling for the bundle installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundle installation
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // Command errors
    #[error("Bad rc ({code}) for cmd '{command}': {output}")]
    #[diagnostic(code(awscli_bundle::command::bad_exit_code))]
    BadExitCode {
        command: String,
        code: String,
        output: String,
    },

    #[error("Failed to run cmd '{command}': {reason}")]
    #[diagnostic(
        code(awscli_bundle::command::spawn_failed),
        help("Check that the program exists and is executable")
    )]
    CommandSpawnFailed { command: String, reason: String },

    // Bundle errors
    #[error(
        "Multiple versions of the CLI were found in {dir}. Please clear out this directory before proceeding."
    )]
    #[diagnostic(
        code(awscli_bundle::bundle::multiple_bundles),
        help("Keep exactly one awscli archive in the packages directory")
    )]
    MultipleBundles { dir: String },

    #[error("Multiple '{prefix}' archives were found in {dir}: {candidates}")]
    #[diagnostic(
        code(awscli_bundle::bundle::ambiguous_archive),
        help("Keep exactly one archive with this prefix in the packages directory")
    )]
    AmbiguousArchive {
        prefix: String,
        dir: String,
        candidates: String,
    },

    #[error("No '{prefix}' archive found in {dir}")]
    #[diagnostic(
        code(awscli_bundle::bundle::not_found),
        help("The bundle looks incomplete; download it again")
    )]
    BundleNotFound { prefix: String, dir: String },

    #[error("Packages directory not found: {path}")]
    #[diagnostic(
        code(awscli_bundle::bundle::packages_dir_not_found),
        help("Run the installer from the unpacked bundle or pass --packages-dir")
    )]
    PackagesDirNotFound { path: String },

    // Archive errors
    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(code(awscli_bundle::archive::extract_failed))]
    ArchiveExtractFailed { path: String, reason: String },

    #[error("Unexpected layout in archive {path}: {reason}")]
    #[diagnostic(code(awscli_bundle::archive::layout))]
    ArchiveLayout { path: String, reason: String },

    // Configuration errors
    #[error("No Python interpreter found on PATH")]
    #[diagnostic(
        code(awscli_bundle::config::interpreter_not_found),
        help("Install python3 or pass --python /path/to/python")
    )]
    InterpreterNotFound,

    #[error("Python interpreter '{name}' not found on PATH")]
    #[diagnostic(
        code(awscli_bundle::config::interpreter_not_on_path),
        help("Pass a full path with --python")
    )]
    InterpreterNotOnPath { name: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(awscli_bundle::config::home_not_found),
        help("Pass --install-dir explicitly")
    )]
    HomeDirNotFound,

    // File system errors
    #[error("Failed to create symlink {link} -> {target}: {reason}")]
    #[diagnostic(code(awscli_bundle::fs::symlink_failed))]
    Symlink {
        link: String,
        target: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(awscli_bundle::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleError>;

/// Creates an IO error that names the operation and path involved
pub fn io_context(
    operation: &str,
    path: &std::path::Path,
    err: &std::io::Error,
) -> BundleError {
    BundleError::IoError {
        message: format!("{} {}: {}", operation, path.display(), err),
    }
}
