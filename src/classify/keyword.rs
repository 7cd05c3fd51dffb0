use super::{prepare, AddressClassifier, ClassifierMode};
use crate::constants::{ADDRESS_INDICATORS, TASK_MARKERS};

/// Substring matching against the address indicator table, optionally vetoed
/// by the task marker table.
pub struct KeywordClassifier {
    indicators: &'static [&'static str],
    exclusions: Option<&'static [&'static str]>,
}

impl KeywordClassifier {
    pub fn with_task_exclusion() -> Self {
        Self {
            indicators: ADDRESS_INDICATORS,
            exclusions: Some(TASK_MARKERS),
        }
    }

    pub fn indicators_only() -> Self {
        Self {
            indicators: ADDRESS_INDICATORS,
            exclusions: None,
        }
    }

    pub fn has_indicator(&self, value: &str) -> bool {
        self.indicators.iter().any(|i| value.contains(i))
    }

    pub fn has_exclusion(&self, value: &str) -> bool {
        self.exclusions
            .is_some_and(|markers| markers.iter().any(|m| value.contains(m)))
    }
}

impl AddressClassifier for KeywordClassifier {
    fn is_address_like(&self, value: Option<&str>) -> bool {
        let Some(val) = prepare(value) else {
            return false;
        };
        self.has_indicator(&val) && !self.has_exclusion(&val)
    }

    fn mode(&self) -> ClassifierMode {
        if self.exclusions.is_some() {
            ClassifierMode::Keyword
        } else {
            ClassifierMode::Indicator
        }
    }
}
