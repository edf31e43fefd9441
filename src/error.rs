use std::sync::Arc;
use thiserror::Error;

/// What went wrong in the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Rejected before any I/O: bad URL, unknown scheme, bad header.
    InvalidRequest,
    Dns,
    Connect,
    Timeout,
    Io,
    Other,
}

/// Failure while sending a hit over the wire.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(TransportErrorKind::Other, message)
    }

    pub fn with_kind(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Keep `source` as the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// The source is diagnostic only.
impl PartialEq for TransportError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for TransportError {}

/// Errors produced by the tracker.
///
/// `RequestConstruction` and `Transport` are handled identically by the
/// throw-on-error policy; the split only tells you whether any network I/O
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The request could not be built (bad URL, bad header value).
    #[error("[ga-tracker] invalid request: {0}")]
    RequestConstruction(String),

    /// The request was built but no response was obtained.
    #[error("[ga-tracker] transport error: {0}")]
    Transport(TransportError),

    /// A configuration key was absent when building `Options` from the host.
    #[error("[ga-tracker] missing configuration value '{0}'")]
    MissingConfiguration(&'static str),
}

impl TrackingError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<TransportError> for TrackingError {
    fn from(err: TransportError) -> Self {
        match err.kind {
            TransportErrorKind::InvalidRequest => Self::RequestConstruction(err.message),
            _ => Self::Transport(err),
        }
    }
}
