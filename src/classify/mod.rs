//! Row classification heuristics
//!
//! Every strategy answers the same question for a single cell value: does this
//! text look like a postal address? Strategies differ only in their matching
//! rule and are selected with [`ClassifierMode`].

pub mod action_item;
pub mod keyword;
pub mod pattern;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CleanerError;

pub use action_item::ActionItemClassifier;
pub use keyword::KeywordClassifier;
pub use pattern::PatternClassifier;

/// Address-likeness test for a single cell value.
///
/// Implementations must be pure: the answer depends only on `value`, and a
/// missing or blank value is never address-like.
pub trait AddressClassifier: Send + Sync {
    fn is_address_like(&self, value: Option<&str>) -> bool;

    fn mode(&self) -> ClassifierMode;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Address keyword present and no task keyword present
    #[default]
    Keyword,
    /// Address keyword present
    Indicator,
    /// Regular-expression address shapes
    Pattern,
}

impl ClassifierMode {
    pub fn classifier(self) -> Box<dyn AddressClassifier> {
        match self {
            ClassifierMode::Keyword => Box::new(KeywordClassifier::with_task_exclusion()),
            ClassifierMode::Indicator => Box::new(KeywordClassifier::indicators_only()),
            ClassifierMode::Pattern => Box::new(PatternClassifier::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassifierMode::Keyword => "keyword",
            ClassifierMode::Indicator => "indicator",
            ClassifierMode::Pattern => "pattern",
        }
    }
}

impl fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierMode {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(ClassifierMode::Keyword),
            "indicator" => Ok(ClassifierMode::Indicator),
            "pattern" => Ok(ClassifierMode::Pattern),
            other => Err(CleanerError::InvalidMode(other.to_string())),
        }
    }
}

// Config files accept the same spellings as `--mode`.
impl<'de> Deserialize<'de> for ClassifierMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Outcome of classifying one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowClass {
    /// A primary task whose designated field is an address; kept
    Primary,
    /// A subtask or to-do item; dropped
    ActionItem,
    /// Neither an address nor recognisably a task; dropped
    Invalid,
}

impl RowClass {
    pub fn is_kept(self) -> bool {
        self == RowClass::Primary
    }
}

/// Combines an address strategy with action-item detection to label a row.
pub struct RowClassifier {
    address: Box<dyn AddressClassifier>,
    action: ActionItemClassifier,
    reject_action_items: bool,
}

impl RowClassifier {
    pub fn new(mode: ClassifierMode) -> Self {
        Self {
            address: mode.classifier(),
            action: ActionItemClassifier::new(),
            reject_action_items: false,
        }
    }

    /// Also drop address-like rows whose action field reads as a task.
    pub fn rejecting_action_items(mut self, reject: bool) -> Self {
        self.reject_action_items = reject;
        self
    }

    pub fn mode(&self) -> ClassifierMode {
        self.address.mode()
    }

    pub fn address(&self) -> &dyn AddressClassifier {
        self.address.as_ref()
    }

    pub fn action(&self) -> &ActionItemClassifier {
        &self.action
    }

    /// Label a row from its address field and its action field (the name
    /// column when one is configured, otherwise the address field again).
    pub fn classify(&self, address_value: Option<&str>, action_value: Option<&str>) -> RowClass {
        let actionable = self.action.is_action_item(action_value);
        if self.reject_action_items && actionable {
            return RowClass::ActionItem;
        }
        if self.address.is_address_like(address_value) {
            return RowClass::Primary;
        }
        if actionable || self.action.is_action_item(address_value) {
            RowClass::ActionItem
        } else {
            RowClass::Invalid
        }
    }
}

/// Trimmed, lowercased value, or `None` when missing or blank.
pub(crate) fn prepare(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
