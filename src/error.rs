//! Error types for the requests crate.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for this crate.
///
/// Non-success HTTP statuses are deliberately NOT represented here: a
/// completed call with a 4xx/5xx status is a successful transfer, and
/// status interpretation belongs to the caller (see [`Content::status`]).
///
/// [`Content::status`]: crate::request::Content::status
#[derive(Debug, Error)]
pub enum Error {
    /// The target URL failed to parse. Raised before any network activity.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as the caller supplied it.
        url: String,
        /// Parser diagnostic.
        source: url::ParseError,
    },

    /// Connection or transport failure, including a whole-call timeout.
    ///
    /// Use [`Error::is_timeout`] to distinguish deadline-exceeded from
    /// other transport failures.
    #[error("transfer failed: {0}")]
    Transfer(#[source] reqwest::Error),

    /// A local file could not be opened for upload, or a download
    /// destination could not be created or written.
    #[error("file access failed at {path}: {source}")]
    FileAccess {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Structured decode of a response body or stream unit failed.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("body encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A session auth helper received a non-success status.
    #[error("authentication rejected with status {status}")]
    AuthRejected {
        /// HTTP status returned by the auth endpoint.
        status: u16,
    },
}

impl Error {
    /// Returns true if this error is a whole-call deadline exceeded.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transfer(e) if e.is_timeout())
    }

    pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_url("not a url", url::ParseError::RelativeUrlWithoutBase);
        assert!(err.to_string().contains("not a url"));

        let err = Error::AuthRejected { status: 401 };
        assert_eq!(err.to_string(), "authentication rejected with status 401");
    }

    #[test]
    fn test_is_timeout_false_for_non_transfer() {
        let err =
            Error::file_access("/tmp/missing", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!err.is_timeout());

        let err = Error::AuthRejected { status: 403 };
        assert!(!err.is_timeout());
    }
}
