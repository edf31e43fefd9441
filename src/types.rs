use crate::error::TrackingError;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Configuration key holding the tracking account (e.g. `UA-XXXXXX-1`).
pub const TRACKING_ACCOUNT_CONFIGURATION_KEY: &str = "GoogleAnalyticsTracker.TrackingAccount";
/// Configuration key holding the tracking domain.
pub const TRACKING_DOMAIN_CONFIGURATION_KEY: &str = "GoogleAnalyticsTracker.TrackingDomain";

/// Plain-HTTP collection endpoint.
pub const BEACON_URL: &str = "http://www.google-analytics.com/collect";
/// SSL collection endpoint.
pub const BEACON_URL_SSL: &str = "https://ssl.google-analytics.com/collect";

/// Parameter key whose value, when present, is sent verbatim as the `Referer` header.
pub const REFERRAL_URL_KEY: &str = "ReferralUrl";

/// Ordered string-to-string parameter set for one hit.
///
/// Iterates in insertion order. Inserting a key that already exists replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert only if `key` is not set yet.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, value.into()));
        }
    }

    /// Insert when `value` is `Some`, skip otherwise.
    pub fn insert_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(v) = value {
            self.insert(key, v.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Parameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Outcome of one dispatch attempt.
///
/// Holds the endpoint and the parameters as they were passed in, not the
/// encoded query string.
#[derive(Debug, Clone)]
pub struct TrackingResult {
    url: String,
    parameters: Parameters,
    outcome: Result<(), TrackingError>,
}

impl TrackingResult {
    pub(crate) fn new(
        url: impl Into<String>,
        parameters: Parameters,
        outcome: Result<(), TrackingError>,
    ) -> Self {
        Self {
            url: url.into(),
            parameters,
            outcome,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The captured error; `None` whenever `success()` is true.
    pub fn error(&self) -> Option<&TrackingError> {
        self.outcome.as_ref().err()
    }

    /// Turn a captured failure into an `Err`, for callers that want errors
    /// propagated regardless of the tracker's policy.
    pub fn into_result(self) -> Result<Self, TrackingError> {
        match self.outcome {
            Ok(()) => Ok(self),
            Err(e) => Err(e),
        }
    }
}

/// Configuration for the tracker.
#[derive(Debug, Clone)]
pub struct Options {
    /// Tracking account / property id (`tid`). Not validated.
    pub tracking_account: String,
    /// Tracking domain. Used for the default `Referer` header.
    pub tracking_domain: String,
    /// Send to the SSL endpoint. Default: false.
    pub use_ssl: bool,
    /// Return errors as `Err` instead of capturing them in the result. Default: false.
    pub throw_on_errors: bool,
    /// User language (`ul`). Default: `en`.
    pub language: String,
    /// Document encoding (`de`). Default: `UTF-8`.
    pub character_set: String,
    /// Replaces the user agent built from the environment.
    pub user_agent: Option<String>,
    /// Replaces the hostname reported by the environment.
    pub hostname: Option<String>,
    /// Transport timeout for a single request. Default: 5s.
    pub timeout: Duration,
}

impl Options {
    /// Create options with required fields only; all others use defaults.
    pub fn new(tracking_account: impl Into<String>, tracking_domain: impl Into<String>) -> Self {
        Self {
            tracking_account: tracking_account.into(),
            tracking_domain: tracking_domain.into(),
            use_ssl: false,
            throw_on_errors: false,
            language: "en".to_string(),
            character_set: "UTF-8".to_string(),
            user_agent: None,
            hostname: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// Build options from a host configuration source.
    ///
    /// `lookup` is asked for [`TRACKING_ACCOUNT_CONFIGURATION_KEY`] and
    /// [`TRACKING_DOMAIN_CONFIGURATION_KEY`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TrackingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account = lookup(TRACKING_ACCOUNT_CONFIGURATION_KEY)
            .filter(|v| !v.is_empty())
            .ok_or(TrackingError::MissingConfiguration(
                TRACKING_ACCOUNT_CONFIGURATION_KEY,
            ))?;
        let domain = lookup(TRACKING_DOMAIN_CONFIGURATION_KEY)
            .filter(|v| !v.is_empty())
            .ok_or(TrackingError::MissingConfiguration(
                TRACKING_DOMAIN_CONFIGURATION_KEY,
            ))?;
        Ok(Self::new(account, domain))
    }

    /// Build options from environment variables named after the configuration
    /// keys, with `.` replaced by `_` and upper-cased
    /// (`GOOGLEANALYTICSTRACKER_TRACKINGACCOUNT`).
    pub fn from_env() -> Result<Self, TrackingError> {
        Self::from_lookup(|key| std::env::var(env_var_name(key)).ok())
    }
}

pub(crate) fn env_var_name(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parameters_keep_insertion_order() {
        let params: Parameters = [("t", "pageview"), ("dp", "/home"), ("a", "1")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["t", "dp", "a"]);
    }

    #[test]
    fn parameters_last_write_wins_in_place() {
        let mut params = Parameters::new();
        params.insert("t", "pageview");
        params.insert("dp", "/a");
        params.insert("t", "event");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("t"), Some("event"));
        assert_eq!(params.iter().next(), Some(("t", "event")));
    }

    #[test]
    fn insert_default_does_not_overwrite() {
        let mut params = Parameters::new();
        params.insert("ul", "de");
        params.insert_default("ul", "en");
        params.insert_default("de", "UTF-8");
        assert_eq!(params.get("ul"), Some("de"));
        assert_eq!(params.get("de"), Some("UTF-8"));
    }

    #[test]
    fn insert_opt_skips_none() {
        let mut params = Parameters::new();
        params.insert_opt::<u32>("ev", None);
        params.insert_opt("iq", Some(3));
        assert!(!params.contains_key("ev"));
        assert_eq!(params.get("iq"), Some("3"));
    }

    #[test]
    fn result_success_has_no_error() {
        let ok = TrackingResult::new("u", Parameters::new(), Ok(()));
        assert!(ok.success());
        assert!(ok.error().is_none());
        assert!(ok.into_result().is_ok());

        let failed = TrackingResult::new(
            "u",
            Parameters::new(),
            Err(TrackingError::RequestConstruction("bad".to_string())),
        );
        assert!(!failed.success());
        assert!(failed.error().is_some());
        assert_eq!(
            failed.into_result().unwrap_err(),
            TrackingError::RequestConstruction("bad".to_string())
        );
    }

    #[test]
    fn options_defaults() {
        let opts = Options::new("UA-1-1", "example.com");
        assert_eq!(opts.language, "en");
        assert_eq!(opts.character_set, "UTF-8");
        assert!(!opts.use_ssl);
        assert!(!opts.throw_on_errors);
        assert_eq!(opts.timeout, Duration::from_secs(5));
    }

    #[test]
    fn options_from_lookup_reads_both_keys() {
        let mut config = HashMap::new();
        config.insert(TRACKING_ACCOUNT_CONFIGURATION_KEY, "UA-42-1");
        config.insert(TRACKING_DOMAIN_CONFIGURATION_KEY, "example.org");
        let opts = Options::from_lookup(|k| config.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(opts.tracking_account, "UA-42-1");
        assert_eq!(opts.tracking_domain, "example.org");
    }

    #[test]
    fn options_from_lookup_reports_missing_key() {
        let err = Options::from_lookup(|k| {
            (k == TRACKING_ACCOUNT_CONFIGURATION_KEY).then(|| "UA-42-1".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            TrackingError::MissingConfiguration(TRACKING_DOMAIN_CONFIGURATION_KEY)
        );
    }

    #[test]
    fn env_var_names() {
        assert_eq!(
            env_var_name(TRACKING_ACCOUNT_CONFIGURATION_KEY),
            "GOOGLEANALYTICSTRACKER_TRACKINGACCOUNT"
        );
    }

    #[test]
    fn parameters_serialize_as_ordered_map() {
        let params: Parameters = [("t", "event"), ("ec", "video")].into_iter().collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"t":"event","ec":"video"}"#);
    }
}
