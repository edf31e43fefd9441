use crate::environment::{default_user_agent, TrackerEnvironment};
use crate::error::TrackingError;
use crate::parameters::HitParameters;
use crate::session::{AnalyticsSession, DefaultSession};
use crate::transport::{HitRequest, Transport, UreqTransport};
use crate::types::{
    Options, Parameters, TrackingResult, BEACON_URL, BEACON_URL_SSL, REFERRAL_URL_KEY,
};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const PROTOCOL_VERSION: &str = "1";

/// Everything except RFC 3986 unreserved characters gets escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Resolved tracker settings. Read on every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub tracking_account: String,
    pub tracking_domain: String,
    pub hostname: String,
    pub language: String,
    pub user_agent: String,
    pub character_set: String,
    pub use_ssl: bool,
    pub throw_on_errors: bool,
}

/// Measurement protocol tracker.
///
/// One GET request per hit, sent on the calling thread through a transport
/// shared by every call. Nothing is buffered or retried. The tracker is
/// `Send + Sync`; wrap it in an `Arc` to track from several threads.
/// Changing settings needs `&mut self`, so do it before sharing.
pub struct Tracker {
    config: TrackerConfig,
    session: Arc<dyn AnalyticsSession>,
    transport: Arc<dyn Transport>,
}

impl Tracker {
    /// Create a tracker with a fresh [`DefaultSession`] and a ureq transport.
    pub fn new(opts: Options, env: &dyn TrackerEnvironment) -> Self {
        let transport = Arc::new(UreqTransport::new(opts.timeout));
        Self::with_parts(opts, env, Arc::new(DefaultSession::new()), transport)
    }

    /// Create a tracker around a host-supplied session and transport.
    /// `opts.timeout` is not used; the transport owns its timeouts.
    pub fn with_parts(
        opts: Options,
        env: &dyn TrackerEnvironment,
        session: Arc<dyn AnalyticsSession>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let config = TrackerConfig {
            tracking_account: opts.tracking_account,
            tracking_domain: opts.tracking_domain,
            hostname: opts.hostname.unwrap_or_else(|| env.hostname()),
            language: opts.language,
            user_agent: opts.user_agent.unwrap_or_else(|| default_user_agent(env)),
            character_set: opts.character_set,
            use_ssl: opts.use_ssl,
            throw_on_errors: opts.throw_on_errors,
        };

        Self {
            config,
            session,
            transport,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TrackerConfig {
        &mut self.config
    }

    pub fn session(&self) -> &dyn AnalyticsSession {
        self.session.as_ref()
    }

    /// Collection endpoint selected by `use_ssl`.
    pub fn beacon_url(&self) -> &'static str {
        if self.config.use_ssl {
            BEACON_URL_SSL
        } else {
            BEACON_URL
        }
    }

    /// Send one typed hit.
    ///
    /// Adds protocol version, account and client id ahead of the hit's own
    /// parameters, fills in language, charset and hostname when the hit
    /// leaves them unset, and appends a cache buster.
    pub fn track<H: HitParameters + ?Sized>(
        &self,
        hit: &H,
    ) -> Result<TrackingResult, TrackingError> {
        let mut parameters = Parameters::new();
        parameters.insert("v", PROTOCOL_VERSION);
        parameters.insert("tid", self.config.tracking_account.as_str());
        parameters.insert("cid", self.session.client_id());

        let hit_parameters = hit.to_parameters();
        parameters.extend(hit_parameters.iter());

        parameters.insert_default("ul", self.config.language.as_str());
        parameters.insert_default("de", self.config.character_set.as_str());
        parameters.insert_default("dh", self.config.hostname.as_str());
        parameters.insert("z", self.session.cache_buster());

        self.dispatch(
            self.beacon_url(),
            parameters,
            hit.general().user_agent_override.as_deref(),
        )
    }

    /// Send `parameters` to `url` as a single GET request.
    ///
    /// Any HTTP response counts as success; the status code is only logged.
    /// On failure the error is captured in the returned result, unless
    /// `throw_on_errors` is set, in which case it is returned as `Err`.
    pub fn dispatch(
        &self,
        url: &str,
        parameters: Parameters,
        user_agent: Option<&str>,
    ) -> Result<TrackingResult, TrackingError> {
        let outcome = self.send(url, &parameters, user_agent);
        if let Err(ref e) = outcome {
            warn!(url, error = %e, "failed to send hit");
        }

        match outcome {
            Err(e) if self.config.throw_on_errors => Err(e),
            outcome => Ok(TrackingResult::new(url, parameters, outcome)),
        }
    }

    fn send(
        &self,
        url: &str,
        parameters: &Parameters,
        user_agent: Option<&str>,
    ) -> Result<(), TrackingError> {
        let request = self.build_request(url, parameters, user_agent)?;
        let status = self.transport.send(&request)?;
        debug!(url, status, hit_type = parameters.get("t"), "hit sent");
        Ok(())
    }

    fn build_request(
        &self,
        url: &str,
        parameters: &Parameters,
        user_agent: Option<&str>,
    ) -> Result<HitRequest, TrackingError> {
        let target = format!("{url}?{}", build_query(parameters));

        let parsed = Url::parse(&target)
            .map_err(|e| TrackingError::RequestConstruction(format!("{url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TrackingError::RequestConstruction(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let referer = match parameters.get(REFERRAL_URL_KEY) {
            Some(referral) => referral.to_string(),
            None => format!("http://{}/", self.config.tracking_domain),
        };
        let user_agent = user_agent.unwrap_or(&self.config.user_agent).to_string();

        check_header("Referer", &referer)?;
        check_header("User-Agent", &user_agent)?;

        Ok(HitRequest {
            target,
            referer,
            user_agent,
        })
    }
}

/// `key=value&` for every pair, values percent-encoded, keys as-is.
///
/// The separator after the last pair is kept.
pub fn build_query(parameters: &Parameters) -> String {
    let mut query = String::new();
    for (key, value) in parameters.iter() {
        query.push_str(key);
        query.push('=');
        query.extend(utf8_percent_encode(value, QUERY_VALUE));
        query.push('&');
    }
    query
}

// Visible ASCII, space and tab only.
fn check_header(name: &str, value: &str) -> Result<(), TrackingError> {
    if value.bytes().any(|b| b != b'\t' && !(0x20..=0x7e).contains(&b)) {
        return Err(TrackingError::RequestConstruction(format!(
            "'{name}' header contains invalid characters"
        )));
    }
    Ok(())
}
