use super::{GeneralParameters, HitParameters, HitType};
use crate::types::Parameters;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionTracking {
    pub general: GeneralParameters,
    pub description: Option<String>,
    pub is_fatal: bool,
}

impl ExceptionTracking {
    pub fn new(description: impl Into<String>, is_fatal: bool) -> Self {
        Self {
            description: Some(description.into()),
            is_fatal,
            ..Default::default()
        }
    }
}

impl HitParameters for ExceptionTracking {
    fn hit_type(&self) -> HitType {
        HitType::Exception
    }

    fn general(&self) -> &GeneralParameters {
        &self.general
    }

    fn write_hit(&self, params: &mut Parameters) {
        params.insert_opt("exd", self.description.as_deref());
        params.insert("exf", if self.is_fatal { "1" } else { "0" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_parameters() {
        let params = ExceptionTracking::new("DatabaseError", false).to_parameters();
        assert_eq!(params.get("t"), Some("exception"));
        assert_eq!(params.get("exd"), Some("DatabaseError"));
        assert_eq!(params.get("exf"), Some("0"));

        let fatal = ExceptionTracking::new("OutOfMemory", true).to_parameters();
        assert_eq!(fatal.get("exf"), Some("1"));
    }
}
