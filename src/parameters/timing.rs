use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

/// User timing plus optional browser page-load timings. All times in
/// milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTracking {
    pub general: GeneralParameters,
    pub category: Option<String>,
    pub variable: Option<String>,
    pub time: Option<u64>,
    pub label: Option<String>,
    pub page_load_time: Option<u64>,
    pub dns_time: Option<u64>,
    pub page_download_time: Option<u64>,
    pub redirect_response_time: Option<u64>,
    pub tcp_connect_time: Option<u64>,
    pub server_response_time: Option<u64>,
    pub dom_interactive_time: Option<u64>,
    pub content_load_time: Option<u64>,
}

impl TimingTracking {
    pub fn new(category: impl Into<String>, variable: impl Into<String>, time: u64) -> Self {
        Self {
            category: Some(category.into()),
            variable: Some(variable.into()),
            time: Some(time),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl HitParameters for TimingTracking {
    fn hit_type(&self) -> HitType {
        HitType::Timing
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert_opt("utc", self.category.as_deref());
        params.insert_opt("utv", self.variable.as_deref());
        params.insert_opt("utt", self.time);
        params.insert_opt("utl", self.label.as_deref());
        params.insert_opt("plt", self.page_load_time);
        params.insert_opt("dns", self.dns_time);
        params.insert_opt("pdt", self.page_download_time);
        params.insert_opt("rrt", self.redirect_response_time);
        params.insert_opt("tcp", self.tcp_connect_time);
        params.insert_opt("srt", self.server_response_time);
        params.insert_opt("dit", self.dom_interactive_time);
        params.insert_opt("clt", self.content_load_time);
    }
}
