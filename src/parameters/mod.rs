//! Typed hit models.
//!
//! Each model knows its hit type and how to flatten itself into the
//! protocol's short parameter codes.

mod app;
mod content;
mod ecommerce;
mod exception;
mod social;
mod timing;

pub use app::ScreenviewTracking;
pub use content::{ContentParameters, EventTracking, PageviewTracking};
pub use ecommerce::{ItemTracking, TransactionTracking};
pub use exception::ExceptionTracking;
pub use social::SocialTracking;
pub use timing::TimingTracking;

use crate::types::Parameters;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `t` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitType {
    Pageview,
    Screenview,
    Event,
    Transaction,
    Item,
    Social,
    Exception,
    Timing,
}

impl HitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pageview => "pageview",
            Self::Screenview => "screenview",
            Self::Event => "event",
            Self::Transaction => "transaction",
            Self::Item => "item",
            Self::Social => "social",
            Self::Exception => "exception",
            Self::Timing => "timing",
        }
    }
}

impl std::fmt::Display for HitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trackable hit.
pub trait HitParameters {
    fn hit_type(&self) -> HitType;

    fn general(&self) -> &GeneralParameters;

    /// Write the hit-specific parameters.
    fn write_hit(&self, params: &mut Parameters);

    /// `t`, then the general parameters, then the hit-specific ones.
    fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.insert("t", self.hit_type().as_str());
        self.general().write_to(&mut params);
        self.write_hit(&mut params);
        params
    }
}

/// Parameters valid for every hit type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralParameters {
    /// Overrides the session's client id (`cid`).
    pub client_id: Option<String>,
    pub user_id: Option<String>,
    pub data_source: Option<String>,
    /// Milliseconds between the hit and its dispatch (`qt`).
    pub queue_time_ms: Option<u64>,
    pub anonymize_ip: bool,
    pub ip_override: Option<String>,
    /// Sent as the `User-Agent` header instead of the tracker's.
    pub user_agent_override: Option<String>,
    pub document_referrer: Option<String>,
    pub campaign_name: Option<String>,
    pub campaign_source: Option<String>,
    pub campaign_medium: Option<String>,
    pub campaign_keyword: Option<String>,
    pub campaign_content: Option<String>,
    pub campaign_id: Option<String>,
    pub screen_resolution: Option<String>,
    pub viewport_size: Option<String>,
    pub screen_colors: Option<String>,
    pub user_language: Option<String>,
    pub document_encoding: Option<String>,
    pub non_interaction: bool,
    /// `cd<index>`
    pub custom_dimensions: BTreeMap<u8, String>,
    /// `cm<index>`
    pub custom_metrics: BTreeMap<u8, i64>,
}

impl GeneralParameters {
    pub fn write_to(&self, params: &mut Parameters) {
        params.insert_opt("cid", self.client_id.as_deref());
        params.insert_opt("uid", self.user_id.as_deref());
        params.insert_opt("ds", self.data_source.as_deref());
        params.insert_opt("qt", self.queue_time_ms);
        if self.anonymize_ip {
            params.insert("aip", "1");
        }
        params.insert_opt("uip", self.ip_override.as_deref());
        params.insert_opt("dr", self.document_referrer.as_deref());
        params.insert_opt("cn", self.campaign_name.as_deref());
        params.insert_opt("cs", self.campaign_source.as_deref());
        params.insert_opt("cm", self.campaign_medium.as_deref());
        params.insert_opt("ck", self.campaign_keyword.as_deref());
        params.insert_opt("cc", self.campaign_content.as_deref());
        params.insert_opt("ci", self.campaign_id.as_deref());
        params.insert_opt("sr", self.screen_resolution.as_deref());
        params.insert_opt("vp", self.viewport_size.as_deref());
        params.insert_opt("sd", self.screen_colors.as_deref());
        params.insert_opt("ul", self.user_language.as_deref());
        params.insert_opt("de", self.document_encoding.as_deref());
        if self.non_interaction {
            params.insert("ni", "1");
        }
        for (index, value) in &self.custom_dimensions {
            params.insert(format!("cd{index}"), value.as_str());
        }
        for (index, value) in &self.custom_metrics {
            params.insert(format!("cm{index}"), value.to_string());
        }
    }
}
