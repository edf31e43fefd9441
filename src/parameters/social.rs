use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialTracking {
    pub general: GeneralParameters,
    /// e.g. `facebook` (`sn`).
    pub network: String,
    /// e.g. `like` (`sa`).
    pub action: String,
    /// Usually a URL (`st`).
    pub target: String,
}

impl SocialTracking {
    pub fn new(
        network: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            action: action.into(),
            target: target.into(),
            ..Default::default()
        }
    }
}

impl HitParameters for SocialTracking {
    fn hit_type(&self) -> HitType {
        HitType::Social
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert("sn", self.network.as_str());
        params.insert("sa", self.action.as_str());
        params.insert("st", self.target.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_parameters() {
        let params = SocialTracking::new("mastodon", "boost", "https://example.com/post").to_parameters();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("t", "social"),
                ("sn", "mastodon"),
                ("sa", "boost"),
                ("st", "https://example.com/post"),
            ]
        );
    }
}
