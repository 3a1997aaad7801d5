//! Fix suggestions for detected issues
//!
//! Deterministic fix templates keyed by issue type, plus a short list of
//! general recommendations derived from which kinds of issue were found.
//! Nothing here inspects the user's code; the snippets are illustrative.

mod catalog;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Issue, IssueType};

/// Rough cost or payoff of applying a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// A suggested code change for one kind of issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub id: String,
    pub approach: String,
    pub description: String,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_before: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_after: String,
    pub steps: Vec<String>,
    pub effort: Level,
    pub impact: Level,
    /// Issue types this fix helps with
    pub applicable_to: Vec<IssueType>,
    /// Minimum Swift version, e.g. `5.9+`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub swift_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl Fix {
    fn new(
        id: &str,
        approach: &str,
        description: &str,
        rationale: &str,
        effort: Level,
        impact: Level,
    ) -> Self {
        Self {
            id: id.to_string(),
            approach: approach.to_string(),
            description: description.to_string(),
            rationale: rationale.to_string(),
            code_before: String::new(),
            code_after: String::new(),
            steps: Vec::new(),
            effort,
            impact,
            applicable_to: Vec::new(),
            swift_version: String::new(),
            references: Vec::new(),
        }
    }

    fn code(mut self, before: &str, after: &str) -> Self {
        self.code_before = before.to_string();
        self.code_after = after.to_string();
        self
    }

    fn steps(mut self, steps: &[&str]) -> Self {
        self.steps = steps.iter().map(|s| s.to_string()).collect();
        self
    }

    fn applies_to(mut self, types: &[IssueType]) -> Self {
        self.applicable_to = types.to_vec();
        self
    }

    fn swift(mut self, version: &str) -> Self {
        self.swift_version = version.to_string();
        self
    }

    fn reference(mut self, url: &str) -> Self {
        self.references.push(url.to_string());
        self
    }
}

/// A project-wide suggestion, 1 being the most important
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: u32,
}

impl Recommendation {
    fn new(category: &str, title: &str, description: &str, priority: u32) -> Self {
        Self {
            category: category.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }
}

/// Fix templates for an issue type. Reserved types have none.
pub fn fixes_for(issue_type: IssueType) -> Vec<Fix> {
    match issue_type {
        IssueType::ExcessiveRerender => catalog::excessive_rerender(),
        IssueType::CascadingUpdate => catalog::cascading_update(),
        IssueType::FrequentTrigger => catalog::frequent_trigger(),
        IssueType::DeepDependencyChain => catalog::deep_chain(),
        IssueType::TimerCascade => catalog::timer_cascade(),
        IssueType::WholeObjectPassing => catalog::whole_object(),
        IssueType::StateInBody | IssueType::UnnecessaryBinding => Vec::new(),
    }
}

/// Every template in the catalog, grouped by issue type
pub fn all_fixes() -> Vec<Fix> {
    [
        IssueType::ExcessiveRerender,
        IssueType::CascadingUpdate,
        IssueType::FrequentTrigger,
        IssueType::DeepDependencyChain,
        IssueType::TimerCascade,
        IssueType::WholeObjectPassing,
    ]
    .into_iter()
    .flat_map(fixes_for)
    .collect()
}

/// Recommendations for the set of issue types present.
///
/// Priorities are handed out in a fixed order, only to recommendations
/// that apply. The debugging tip is always last.
pub fn recommendations(issues: &[Issue]) -> Vec<Recommendation> {
    let found: HashSet<IssueType> = issues.iter().map(|i| i.issue_type).collect();
    let mut recs = Vec::new();
    let mut priority = 1;

    let mut emit = |applies: bool, category: &str, title: &str, description: &str| {
        if applies {
            recs.push(Recommendation::new(category, title, description, priority));
            priority += 1;
        }
    };

    emit(
        found.contains(&IssueType::ExcessiveRerender) || found.contains(&IssueType::CascadingUpdate),
        "Architecture",
        "Consider using @Observable (iOS 17+)",
        "@Observable provides fine-grained observation - views only update when properties they actually read change, unlike @ObservableObject which triggers on any @Published change.",
    );
    emit(
        found.contains(&IssueType::WholeObjectPassing),
        "Data Flow",
        "Pass only required data to child views",
        "Instead of passing entire model objects, extract and pass only the specific properties each view needs. This reduces unnecessary re-renders when unrelated properties change.",
    );
    emit(
        found.contains(&IssueType::TimerCascade),
        "Animation",
        "Use TimelineView for time-based updates",
        "TimelineView is optimized for animations and time-based updates. It's more efficient than Timer for UI updates and integrates better with SwiftUI's rendering pipeline.",
    );
    emit(
        found.contains(&IssueType::DeepDependencyChain),
        "Architecture",
        "Flatten state dependencies",
        "Deep dependency chains increase latency and make the app harder to debug. Consider using derived state or restructuring to reduce the chain depth.",
    );

    recs.push(Recommendation::new(
        "Debugging",
        "Use _printChanges() for debugging",
        "Add Self._printChanges() in view body to log exactly why a view is re-rendering. Remove before shipping.",
        priority + 10,
    ));
    recs
}
