//! Error types for wb-scaffold

use thiserror::Error;

/// Result type alias using wb-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Local template checkout not found
    #[error("Local template checkout not found: {path}")]
    SourceNotFound { path: String },

    /// Download rejected by the server
    #[error("Download failed with status {status}: {url}")]
    DownloadFailed { status: u16, url: String },

    /// Extracted archive did not contain the expected layout
    #[error("Template archive is missing expected directory: {root}")]
    MalformedArchive { root: String },

    /// Install directory could not be entered
    #[error("Failed to enter install directory {dir}: {source}")]
    InstallDirUnavailable {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a source not found error
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a download failed error
    pub fn download_failed(status: u16, url: impl Into<String>) -> Self {
        Self::DownloadFailed {
            status,
            url: url.into(),
        }
    }

    /// Create a malformed archive error
    pub fn malformed_archive(root: impl Into<String>) -> Self {
        Self::MalformedArchive { root: root.into() }
    }

    /// Create an install directory unavailable error
    pub fn install_dir_unavailable(dir: impl Into<String>, source: std::io::Error) -> Self {
        Self::InstallDirUnavailable {
            dir: dir.into(),
            source,
        }
    }
}
