//! Line scoring for a symbol, by node kind

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::graph::NodeKind;

/// How a source line was tied to a trace node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// A declaration of the symbol
    Exact,
    /// The symbol merely appears on the line
    Fuzzy,
    /// Context suggests the line is related
    Inferred,
}

/// Confidence given to plain containment
pub const CONTAINMENT_CONFIDENCE: f64 = 0.3;

const GESTURES: &[&str] = &["ontapgesture", "ondraggesture", "onlongpressgesture", "gesture"];

/// Compiled patterns for one symbol of one node
pub struct SymbolMatcher {
    symbol: String,
    symbol_lower: String,
    kind: NodeKind,
    declarations: Vec<(Regex, f64)>,
}

fn compile(pattern: String) -> Option<Regex> {
    Regex::new(&pattern).ok()
}

impl SymbolMatcher {
    pub fn new(symbol: &str, kind: NodeKind) -> Self {
        let quoted = regex::escape(symbol);
        let mut declarations = Vec::new();

        match kind {
            NodeKind::View => {
                let conformance = compile(format!(r"struct\s+{quoted}\s*:\s*(?:\w+,\s*)*View"));
                declarations.extend(conformance.map(|r| (r, 0.95)));
                if symbol.to_lowercase().contains("view") {
                    let plain = compile(format!(r"struct\s+{quoted}\b"));
                    declarations.extend(plain.map(|r| (r, 0.85)));
                }
            }
            NodeKind::State => {
                let wrappers = [
                    ("State|StateObject", 0.95),
                    ("ObservedObject|EnvironmentObject", 0.9),
                    ("Binding", 0.85),
                ];
                for (wrapper, confidence) in wrappers {
                    let pattern =
                        compile(format!(r"@(?:{wrapper})\s+(?:private\s+)?var\s+{quoted}\b"));
                    declarations.extend(pattern.map(|r| (r, confidence)));
                }
            }
            NodeKind::Cause | NodeKind::Other => {}
        }

        Self {
            symbol: symbol.to_string(),
            symbol_lower: symbol.to_lowercase(),
            kind,
            declarations,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn score_cause(&self, line: &str) -> Option<f64> {
        let lower = line.to_lowercase();
        if lower.contains("button") && lower.contains(&self.symbol_lower) {
            Some(0.85)
        } else if GESTURES.iter().any(|g| lower.contains(g)) {
            Some(0.8)
        } else if lower.contains("timer") {
            Some(0.75)
        } else if lower.contains("notificationcenter") || lower.contains("onreceive") {
            Some(0.7)
        } else {
            None
        }
    }

    /// Score a line that may mention the symbol.
    ///
    /// Lines without the symbol score nothing. Lines with it but no
    /// kind-specific pattern fall back to a fuzzy containment match.
    pub fn score(&self, line: &str) -> Option<(f64, MatchType)> {
        if !line.contains(&self.symbol) {
            return None;
        }

        let specific = match self.kind {
            NodeKind::View => self
                .declarations
                .iter()
                .find(|(re, _)| re.is_match(line))
                .map(|(_, c)| (*c, MatchType::Exact))
                .or_else(|| {
                    (line.contains("var body") && line.contains("View"))
                        .then_some((0.5, MatchType::Inferred))
                }),
            NodeKind::State => self
                .declarations
                .iter()
                .find(|(re, _)| re.is_match(line))
                .map(|(_, c)| (*c, MatchType::Exact)),
            NodeKind::Cause => self.score_cause(line).map(|c| (c, MatchType::Exact)),
            NodeKind::Other => None,
        };

        specific
            .or(Some((CONTAINMENT_CONFIDENCE, MatchType::Fuzzy)))
            .filter(|(c, _)| *c >= CONTAINMENT_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_conformance() {
        let m = SymbolMatcher::new("ItemRow", NodeKind::View);
        assert_eq!(
            m.score("struct ItemRow: View {"),
            Some((0.95, MatchType::Exact))
        );
        assert_eq!(
            m.score("struct ItemRow: Equatable, View {"),
            Some((0.95, MatchType::Exact))
        );
    }

    #[test]
    fn test_view_named_struct_without_conformance() {
        let m = SymbolMatcher::new("ListView", NodeKind::View);
        assert_eq!(m.score("struct ListView {"), Some((0.85, MatchType::Exact)));
        // only names containing "view" get the plain struct pattern
        let m = SymbolMatcher::new("ItemRow", NodeKind::View);
        assert_eq!(m.score("struct ItemRow {"), Some((0.3, MatchType::Fuzzy)));
    }

    #[test]
    fn test_view_body_inferred() {
        let m = SymbolMatcher::new("Counter", NodeKind::View);
        assert_eq!(
            m.score("var body: some View { Counter() }"),
            Some((0.5, MatchType::Inferred))
        );
    }

    #[test]
    fn test_state_wrappers() {
        let m = SymbolMatcher::new("count", NodeKind::State);
        assert_eq!(m.score("@State private var count = 0"), Some((0.95, MatchType::Exact)));
        assert_eq!(m.score("@StateObject var count = C()"), Some((0.95, MatchType::Exact)));
        assert_eq!(m.score("@ObservedObject var count: C"), Some((0.9, MatchType::Exact)));
        assert_eq!(m.score("@EnvironmentObject var count: C"), Some((0.9, MatchType::Exact)));
        assert_eq!(m.score("@Binding var count: Int"), Some((0.85, MatchType::Exact)));
        assert_eq!(m.score("count += 1"), Some((0.3, MatchType::Fuzzy)));
    }

    #[test]
    fn test_state_word_boundary() {
        let m = SymbolMatcher::new("count", NodeKind::State);
        assert_eq!(m.score("@State var counter = 0"), Some((0.3, MatchType::Fuzzy)));
    }

    #[test]
    fn test_cause_patterns() {
        let m = SymbolMatcher::new("refresh", NodeKind::Cause);
        assert_eq!(m.score(r#"Button("Go") { refresh() }"#), Some((0.85, MatchType::Exact)));
        assert_eq!(m.score(".onTapGesture { refresh() }"), Some((0.8, MatchType::Exact)));
        assert_eq!(m.score("Timer.publish { refresh() }"), Some((0.75, MatchType::Exact)));
        assert_eq!(m.score(".onReceive(pub) { refresh() }"), Some((0.7, MatchType::Exact)));
        assert_eq!(m.score("refresh()"), Some((0.3, MatchType::Fuzzy)));
    }

    #[test]
    fn test_symbol_absent() {
        let m = SymbolMatcher::new("Missing", NodeKind::Other);
        assert_eq!(m.score("struct Other: View {}"), None);
        assert_eq!(m.symbol(), "Missing");
    }

    #[test]
    fn test_containment_is_case_sensitive() {
        let m = SymbolMatcher::new("Feed", NodeKind::Other);
        assert_eq!(m.score("let feed = 1"), None);
        assert_eq!(m.score("let x = Feed()"), Some((0.3, MatchType::Fuzzy)));
    }

    #[test]
    fn test_symbol_with_regex_metacharacters() {
        let m = SymbolMatcher::new("a.b", NodeKind::State);
        assert_eq!(m.score("@State var aXb = 1"), None);
    }
}
