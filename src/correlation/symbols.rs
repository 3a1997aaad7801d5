//! Candidate source symbols extracted from trace labels

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static TYPE_NAME: OnceLock<Regex> = OnceLock::new();
static WRAPPED_PROPERTY: OnceLock<Regex> = OnceLock::new();
static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

/// Capitalized identifiers, optionally with a view-like suffix
fn type_name() -> &'static Regex {
    TYPE_NAME.get_or_init(|| {
        Regex::new(r"\b([A-Z][a-zA-Z0-9]*(?:View|Screen|Page|Cell|Row|Item)?)\b")
            .expect("valid regex")
    })
}

/// Property names following a SwiftUI property wrapper
fn wrapped_property() -> &'static Regex {
    WRAPPED_PROPERTY.get_or_init(|| {
        Regex::new(
            r"@(?:State|ObservedObject|StateObject|EnvironmentObject|Binding|Environment)\s+(?:var\s+)?(\w+)",
        )
        .expect("valid regex")
    })
}

fn identifier() -> &'static Regex {
    IDENTIFIER.get_or_init(|| Regex::new(r"\b([a-zA-Z_][a-zA-Z0-9_]*)\b").expect("valid regex"))
}

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "for", "in", "to", "of", "with", "var", "let", "func",
    "struct", "class", "view", "body", "some", "any", "true", "false", "nil", "update",
    "change", "trigger", "cause",
];

/// Words too generic to search for (case-insensitive)
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// Symbols worth searching for in source, first occurrence order, no duplicates
pub fn extract_symbols(label: &str) -> Vec<String> {
    let mut candidates: Vec<&str> = Vec::new();

    candidates.extend(type_name().find_iter(label).map(|m| m.as_str()));
    candidates.extend(
        wrapped_property()
            .captures_iter(label)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str()),
    );
    candidates.extend(
        identifier()
            .find_iter(label)
            .map(|m| m.as_str())
            .filter(|w| !is_stop_word(w)),
    );

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_type_names_first() {
        let symbols = extract_symbols("ItemRow body update in ListView");
        assert_eq!(symbols, vec!["ItemRow", "ListView"]);
    }

    #[test]
    fn test_extracts_wrapped_property() {
        let symbols = extract_symbols("@State var isExpanded changed");
        assert_eq!(symbols, vec!["State", "isExpanded", "changed"]);
    }

    #[test]
    fn test_stop_words_case_insensitive() {
        assert!(is_stop_word("View"));
        assert!(is_stop_word("BODY"));
        assert!(!is_stop_word("counter"));
        let symbols = extract_symbols("view update for the body");
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_type_names_bypass_stop_list() {
        // capitalized words come from the type-name pattern, which has no stop list
        let symbols = extract_symbols("View");
        assert_eq!(symbols, vec!["View"]);
    }
}
