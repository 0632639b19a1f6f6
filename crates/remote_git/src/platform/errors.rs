use thiserror::Error;

use crate::http::HttpError;

/// Errors raised by clients, the factory and the registry.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Requested or detected type is not registered.
    #[error("type '{client_type}' not found in [{}]", .known_types.join(", "))]
    ClientNotFound {
        client_type: String,
        known_types: Vec<String>,
    },

    /// A backend lacks the static metadata needed to register it.
    #[error("Missing {field} on backend '{backend}'")]
    Configuration {
        backend: &'static str,
        field: &'static str,
    },

    /// The query needs parameters the caller did not supply.
    #[error("Missing required parameter: {0}")]
    RequiredParameter(String),

    /// URL scheme cannot be served by any registered backend.
    #[error("protocol '{scheme}' for '{url}' is not supported ({})", protocol_note(.scheme))]
    ProtocolNotSupported { scheme: String, url: String },

    /// A raw file could not be read.
    #[error(transparent)]
    RawFileNotFound(#[from] RawFileNotFoundError),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// API returned an error response.
    #[error("API error ({status}) on {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A listing element lacks a field every project must have.
    #[error("Invalid project record: {0}")]
    InvalidProject(String),

    /// Local folder scan failed.
    #[cfg(feature = "local")]
    #[error("Scan error: {0}")]
    Walk(#[from] walkdir::Error),
}

fn protocol_note(scheme: &str) -> &'static str {
    if scheme == "file" {
        "LocalClient has been removed"
    } else {
        "use HTTPS"
    }
}

impl ClientError {
    /// Create a required parameter error.
    #[inline]
    pub fn required_parameter(message: impl Into<String>) -> Self {
        Self::RequiredParameter(message.into())
    }

    /// Create an invalid project error.
    #[inline]
    pub fn invalid_project(message: impl Into<String>) -> Self {
        Self::InvalidProject(message.into())
    }

    /// Check if this error means "file unavailable".
    #[inline]
    pub fn is_raw_file_not_found(&self) -> bool {
        matches!(self, Self::RawFileNotFound(_))
    }
}

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A file could not be read at a ref.
///
/// Covers a true 404, an unknown ref and any transport failure alike; the
/// wrapped cause is kept for diagnostics only.
#[derive(Debug, Error)]
#[error("file '{file_path}' not found on branch '{git_ref}'")]
pub struct RawFileNotFoundError {
    pub file_path: String,
    pub git_ref: String,
    #[source]
    pub source: Option<BoxedCause>,
}

impl RawFileNotFoundError {
    pub fn new(file_path: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            git_ref: git_ref.into(),
            source: None,
        }
    }

    /// Attach the lower-level cause.
    pub fn with_source(mut self, source: impl Into<BoxedCause>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
