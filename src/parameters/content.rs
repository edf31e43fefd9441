use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

/// Page-level fields shared by pageviews and events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentParameters {
    /// Full URL of the page (`dl`).
    pub document_location: Option<String>,
    pub document_host_name: Option<String>,
    /// Path portion of the page URL, starting with `/` (`dp`).
    pub document_path: Option<String>,
    pub document_title: Option<String>,
    pub link_id: Option<String>,
}

impl ContentParameters {
    pub fn write_to(&self, params: &mut Parameters) {
        params.insert_opt("dl", self.document_location.as_deref());
        params.insert_opt("dh", self.document_host_name.as_deref());
        params.insert_opt("dp", self.document_path.as_deref());
        params.insert_opt("dt", self.document_title.as_deref());
        params.insert_opt("linkid", self.link_id.as_deref());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageviewTracking {
    pub general: GeneralParameters,
    pub content: ContentParameters,
}

impl PageviewTracking {
    pub fn new(document_path: impl Into<String>) -> Self {
        Self {
            content: ContentParameters {
                document_path: Some(document_path.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.content.document_title = Some(title.into());
        self
    }
}

impl HitParameters for PageviewTracking {
    fn hit_type(&self) -> HitType {
        HitType::Pageview
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        self.content.write_to(params);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTracking {
    pub general: GeneralParameters,
    pub content: ContentParameters,
    pub category: String,
    pub action: String,
    pub label: Option<String>,
    /// Must be non-negative.
    pub value: Option<u64>,
}

impl EventTracking {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }
}

impl HitParameters for EventTracking {
    fn hit_type(&self) -> HitType {
        HitType::Event
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        self.content.write_to(params);
        params.insert("ec", self.category.as_str());
        params.insert("ea", self.action.as_str());
        params.insert_opt("el", self.label.as_deref());
        params.insert_opt("ev", self.value);
    }
}
