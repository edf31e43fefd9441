use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

/// Screen view from a mobile or desktop app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenviewTracking {
    pub general: GeneralParameters,
    /// Required for screenview hits (`cd`).
    pub screen_name: String,
    /// Required for app tracking (`an`).
    pub app_name: String,
    pub app_id: Option<String>,
    pub app_version: Option<String>,
    pub app_installer_id: Option<String>,
}

impl ScreenviewTracking {
    pub fn new(app_name: impl Into<String>, screen_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            screen_name: screen_name.into(),
            ..Default::default()
        }
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }
}

impl HitParameters for ScreenviewTracking {
    fn hit_type(&self) -> HitType {
        HitType::Screenview
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert("cd", self.screen_name.as_str());
        params.insert("an", self.app_name.as_str());
        params.insert_opt("aid", self.app_id.as_deref());
        params.insert_opt("av", self.app_version.as_deref());
        params.insert_opt("aiid", self.app_installer_id.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screenview_parameters() {
        let params = ScreenviewTracking::new("Notes", "Settings")
            .with_app_version("2.1.0")
            .to_parameters();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("t", "screenview"),
                ("cd", "Settings"),
                ("an", "Notes"),
                ("av", "2.1.0"),
            ]
        );
    }
}
