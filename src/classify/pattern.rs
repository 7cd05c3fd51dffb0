use once_cell::sync::Lazy;
use regex::Regex;

use super::{prepare, AddressClassifier, ClassifierMode};
use crate::constants::{
    PATTERN_DIRECTIONS, PATTERN_LOCATION_WORDS, PATTERN_MIN_STREET_TOKENS, PATTERN_STREET_TYPES,
};

fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Location keyword, PO box, directional word or `#<digits>` unit marker.
static ADDRESS_SHAPE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"\b(?:{locations})\b|\b(?:p\.?\s*o\.?|post\s+office)\s*box\b|\b(?:{directions})\b|#\d+",
        locations = alternation(PATTERN_LOCATION_WORDS),
        directions = alternation(PATTERN_DIRECTIONS),
    );
    Regex::new(&pattern).expect("address shape pattern is valid")
});

/// House number up front, street type somewhere after it.
static NUMBERED_STREET: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^\d+[a-z]?\b.*\b(?:{types})\b",
        types = alternation(PATTERN_STREET_TYPES),
    );
    Regex::new(&pattern).expect("numbered street pattern is valid")
});

/// Whole-word regular expression matching of address shapes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternClassifier;

impl PatternClassifier {
    pub fn new() -> Self {
        Self
    }

    fn is_numbered_street(value: &str) -> bool {
        value.split_whitespace().count() >= PATTERN_MIN_STREET_TOKENS && NUMBERED_STREET.is_match(value)
    }
}

impl AddressClassifier for PatternClassifier {
    fn is_address_like(&self, value: Option<&str>) -> bool {
        let Some(val) = prepare(value) else {
            return false;
        };
        ADDRESS_SHAPE.is_match(&val) || Self::is_numbered_street(&val)
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Pattern
    }
}
