use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all aarpub operations.
#[derive(Debug, Error, Diagnostic)]
pub enum AarpubError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `Aarpub.toml` could not be read or parsed.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Aarpub.toml for syntax errors"))]
    Manifest { message: String },

    /// A publication descriptor is malformed or clashes with another one.
    #[error("Catalog error: {message}")]
    #[diagnostic(help("Each [[publication]] needs a unique name and artifact-id"))]
    Catalog { message: String },

    /// A descriptor points at an archive that is not on disk.
    #[error("Archive not found: {}", path.display())]
    #[diagnostic(help("Build the AAR first and place it at the path named by `archive`"))]
    MissingArchive { path: PathBuf },

    /// Signing with gpg failed.
    #[error("Signing failed: {message}")]
    Signing { message: String },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The portal rejected the deployment or it did not settle in time.
    #[error("Deployment failed: {message}")]
    Deployment { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

