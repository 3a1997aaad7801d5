//! Keyword classification of trace labels
//!
//! Ingestion uses [`classify`] to assign node kinds and the detectors use
//! the label predicates below, so both sides read labels the same way.

use regex::Regex;
use std::sync::OnceLock;

use super::store_models::NodeKind;

static STATE_KEYWORDS: OnceLock<Regex> = OnceLock::new();
static VIEW_KEYWORDS: OnceLock<Regex> = OnceLock::new();
static CAUSE_KEYWORDS: OnceLock<Regex> = OnceLock::new();

fn state_keywords() -> &'static Regex {
    STATE_KEYWORDS.get_or_init(|| {
        Regex::new(
            r"(?i)(state\s+change|\bstate\b|@state|@observedobject|@stateobject|\benvironment\b)",
        )
        .expect("valid regex")
    })
}

fn view_keywords() -> &'static Regex {
    VIEW_KEYWORDS.get_or_init(|| {
        Regex::new(r"(?i)(view\s+body\s+update|view\s+update|\bbody\(\)|\bView\b)")
            .expect("valid regex")
    })
}

fn cause_keywords() -> &'static Regex {
    CAUSE_KEYWORDS.get_or_init(|| {
        Regex::new(
            r"(?i)(gesture|tap|button|timer|notification|publisher|async|network|animation|scene)",
        )
        .expect("valid regex")
    })
}

/// Kind named by an explicit type hint, if any
fn kind_from_hint(hint: &str) -> Option<NodeKind> {
    let hint = hint.to_lowercase();
    if hint.contains("state") {
        Some(NodeKind::State)
    } else if hint.contains("view") {
        Some(NodeKind::View)
    } else if hint.contains("cause") {
        Some(NodeKind::Cause)
    } else {
        None
    }
}

/// Kind suggested by keywords in a label, checked state, view, cause
pub fn classify_label(label: &str) -> NodeKind {
    if state_keywords().is_match(label) {
        NodeKind::State
    } else if view_keywords().is_match(label) {
        NodeKind::View
    } else if cause_keywords().is_match(label) {
        NodeKind::Cause
    } else {
        NodeKind::Other
    }
}

/// Classify a node. A hint naming a known kind wins over label keywords.
pub fn classify(type_hint: &str, label: &str) -> NodeKind {
    kind_from_hint(type_hint).unwrap_or_else(|| classify_label(label))
}

/// Labels of triggers that fire on a schedule
pub fn is_timer_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("timer") || lower.contains("interval")
}

/// Labels that look like a whole model or store object rather than a field
pub fn is_generic_object_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    ["model", "viewmodel", "store", "state", "object"]
        .iter()
        .any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_wins_over_label() {
        assert_eq!(classify("View", "@State counter"), NodeKind::View);
        assert_eq!(classify("CAUSE", "body()"), NodeKind::Cause);
        assert_eq!(classify("state-change", "Button"), NodeKind::State);
    }

    #[test]
    fn test_hint_checked_state_then_view() {
        // "stateview" names both; state is checked first
        assert_eq!(classify("stateview", ""), NodeKind::State);
    }

    #[test]
    fn test_unknown_hint_falls_back_to_label() {
        assert_eq!(classify("event", "Tap gesture"), NodeKind::Cause);
        assert_eq!(classify("", "ContentView body() evaluated"), NodeKind::View);
        assert_eq!(classify("", "@ObservedObject model"), NodeKind::State);
        assert_eq!(classify("", "something else"), NodeKind::Other);
    }

    #[test]
    fn test_label_priority_state_before_view_before_cause() {
        assert_eq!(classify_label("State change in View"), NodeKind::State);
        assert_eq!(classify_label("View update after tap"), NodeKind::View);
        assert_eq!(classify_label("Timer fired"), NodeKind::Cause);
    }

    #[test]
    fn test_word_boundaries() {
        // "statement" is not the word "state"
        assert_eq!(classify_label("statement"), NodeKind::Other);
        assert_eq!(classify_label("Environment value"), NodeKind::State);
        assert_eq!(classify_label("Preview"), NodeKind::Other);
    }

    #[test]
    fn test_timer_label() {
        assert!(is_timer_label("Timer.publish"));
        assert!(is_timer_label("refresh INTERVAL"));
        assert!(!is_timer_label("Button tap"));
    }

    #[test]
    fn test_generic_object_label() {
        assert!(is_generic_object_label("AppViewModel"));
        assert!(is_generic_object_label("DataStore"));
        assert!(is_generic_object_label("AppState"));
        assert!(!is_generic_object_label("count"));
    }
}
