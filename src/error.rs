//! Unified error type.

use std::time::Duration;

use http::uri::{InvalidUri, InvalidUriParts};

/// A boxed error from a collaborator: a transport adapter or a filter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shorthand for results whose error is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type returned by relayer's fallible operations.
///
/// A non-2xx answer from the backend is a valid [`Response`](crate::Response),
/// not an `Error`. This type surfaces misuse of the session, unusable targets,
/// and failures raised by collaborators. Collaborator errors are stored as-is
/// and reachable through [`source`](std::error::Error::source).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `to` was called before any request was bound with `forward`.
    #[error("missing request instance")]
    MissingRequest,

    /// The target string is not a URI.
    #[error("malformed target `{target}`")]
    MalformedTarget {
        target: String,
        #[source]
        source: InvalidUri,
    },

    /// The target is a URI but has no scheme or no host to forward to.
    #[error("target `{0}` must include a scheme and a host")]
    IncompleteTarget(String),

    /// The rewritten components do not form a valid URI.
    #[error("rewritten uri is invalid")]
    InvalidUri(#[from] InvalidUriParts),

    /// The rewritten path or authority could not be parsed.
    #[error("rewritten uri component is invalid")]
    InvalidUriComponent(#[from] InvalidUri),

    /// The inbound request body could not be read.
    #[error("failed to read request body")]
    Body(#[source] BoxError),

    /// The transport adapter failed to produce a response.
    #[error("transport failed")]
    Transport(#[source] BoxError),

    /// A filter in the pipeline failed.
    #[error("filter failed")]
    Filter(#[source] BoxError),

    /// The bundled hyper adapter gave up waiting for the backend.
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Wraps a failure to read an inbound body.
    pub fn body(e: impl Into<BoxError>) -> Self {
        Self::Body(e.into())
    }

    /// Wraps a transport adapter failure.
    pub fn transport(e: impl Into<BoxError>) -> Self {
        Self::Transport(e.into())
    }

    /// Wraps a filter failure.
    pub fn filter(e: impl Into<BoxError>) -> Self {
        Self::Filter(e.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::transport(io);

        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "refused");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn filter_error_from_str() {
        let err = Error::filter("denied");
        assert_eq!(err.to_string(), "filter failed");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("denied"));
    }
}
