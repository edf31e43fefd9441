use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Cross-request session state consulted for every hit.
pub trait AnalyticsSession: Send + Sync {
    /// Anonymous client id (`cid`).
    fn client_id(&self) -> String;

    /// Random value (`z`) that keeps intermediaries from caching the hit.
    fn cache_buster(&self) -> String;
}

/// Session with a fixed client id and random cache busters.
#[derive(Debug, Clone)]
pub struct DefaultSession {
    client_id: String,
}

impl DefaultSession {
    /// Session with a freshly generated random client id.
    pub fn new() -> Self {
        Self {
            client_id: Uuid::new_v4().to_string(),
        }
    }

    /// Session whose client id is derived from a host-supplied identity.
    ///
    /// The same identity always maps to the same client id; the identity
    /// itself is never sent.
    pub fn for_user(identity: &str) -> Self {
        Self {
            client_id: hash_client_id(identity),
        }
    }

    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

impl Default for DefaultSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsSession for DefaultSession {
    fn client_id(&self) -> String {
        self.client_id.clone()
    }

    fn cache_buster(&self) -> String {
        let bits = Uuid::new_v4().as_u128();
        ((bits as u32) & 0x7fff_ffff).to_string()
    }
}

/// SHA-256 of `raw`, first 16 bytes laid out as a UUID string.
pub fn hash_client_id(raw: &str) -> String {
    let hash = Sha256::digest(raw.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);
    Uuid::from_bytes(bytes).hyphenated().to_string()
}
