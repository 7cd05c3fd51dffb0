use super::prepare;
use crate::constants::{ACTION_MARKERS, ACTION_VERBS};

/// Detects text that reads as a to-do rather than a location: it contains an
/// action verb or an action marker anywhere in the value.
pub struct ActionItemClassifier {
    verbs: &'static [&'static str],
    markers: &'static [&'static str],
}

impl ActionItemClassifier {
    pub fn new() -> Self {
        Self {
            verbs: ACTION_VERBS,
            markers: ACTION_MARKERS,
        }
    }

    pub fn is_action_item(&self, value: Option<&str>) -> bool {
        let Some(val) = prepare(value) else {
            return false;
        };
        self.verbs
            .iter()
            .chain(self.markers.iter())
            .any(|keyword| val.contains(keyword))
    }
}

impl Default for ActionItemClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_verbs() {
        let c = ActionItemClassifier::new();
        assert!(c.is_action_item(Some("Call client")));
        assert!(c.is_action_item(Some("  email: lease renewal")));
        assert!(c.is_action_item(Some("Pick up keys")));
        assert!(c.is_action_item(Some("fix")));
    }

    #[test]
    fn test_verbs_inside_value() {
        let c = ActionItemClassifier::new();
        assert!(c.is_action_item(Some("Please call client")));
        assert!(c.is_action_item(Some("Need to fix gutter")));
        assert!(c.is_action_item(Some("Calling list")));
        assert!(c.is_action_item(Some("Landlord wants us to SUBMIT forms")));
    }

    #[test]
    fn test_markers_anywhere() {
        let c = ActionItemClassifier::new();
        assert!(c.is_action_item(Some("Landlord follow up")));
        assert!(c.is_action_item(Some("Roof quote ASAP")));
    }

    #[test]
    fn test_addresses_are_not_action_items() {
        let c = ActionItemClassifier::new();
        assert!(!c.is_action_item(Some("123 Main St")));
        assert!(!c.is_action_item(Some("456 Oak Ave, Unit 2")));
        assert!(!c.is_action_item(Some("")));
        assert!(!c.is_action_item(None));
    }
}
