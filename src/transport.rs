use crate::error::{TransportError, TransportErrorKind};

use std::io::{self, Read};
use std::time::Duration;

// Upper bound on how much of a response body is drained before the
// connection is handed back to the pool.
const MAX_DRAIN_BYTES: u64 = 64 * 1024;

/// A fully built hit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRequest {
    /// Endpoint plus encoded query string.
    pub target: String,
    pub referer: String,
    pub user_agent: String,
}

/// Sends a hit request and reports the HTTP status of whatever came back.
///
/// Implementations must be safe for concurrent use; a tracker shares one
/// transport across all of its dispatch calls.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HitRequest) -> Result<u16, TransportError>;
}

/// Default transport backed by a pooled `ureq::Agent`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HitRequest) -> Result<u16, TransportError> {
        let result = self
            .agent
            .get(&request.target)
            .set("Referer", &request.referer)
            .set("User-Agent", &request.user_agent)
            .call();

        match result {
            Ok(resp) => {
                let status = resp.status();
                release(resp);
                Ok(status)
            }
            // Non-2xx is still a response.
            Err(ureq::Error::Status(status, resp)) => {
                release(resp);
                Ok(status)
            }
            Err(ureq::Error::Transport(e)) => Err(transport_error(e)),
        }
    }
}

fn transport_error(e: ureq::Transport) -> TransportError {
    let kind = match e.kind() {
        // Raised before a socket is opened.
        ureq::ErrorKind::InvalidUrl
        | ureq::ErrorKind::UnknownScheme
        | ureq::ErrorKind::BadHeader => TransportErrorKind::InvalidRequest,
        ureq::ErrorKind::Dns => TransportErrorKind::Dns,
        ureq::ErrorKind::ConnectionFailed => TransportErrorKind::Connect,
        ureq::ErrorKind::Io if is_timeout(&e) => TransportErrorKind::Timeout,
        ureq::ErrorKind::Io => TransportErrorKind::Io,
        _ => TransportErrorKind::Other,
    };
    TransportError::with_kind(kind, e.to_string()).with_source(e)
}

fn is_timeout(e: &ureq::Transport) -> bool {
    std::error::Error::source(e)
        .and_then(|src| src.downcast_ref::<io::Error>())
        .is_some_and(|err| {
            matches!(
                err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            )
        })
}

fn release(resp: ureq::Response) {
    let mut reader = resp.into_reader().take(MAX_DRAIN_BYTES);
    let _ = io::copy(&mut reader, &mut io::sink());
}
