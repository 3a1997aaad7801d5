//! Instruction block for an automated fix-applying agent

use serde::{Deserialize, Serialize};

use super::Summary;
use crate::models::Issue;
use crate::scoring::HealthStatus;

const NO_PRIORITY_PLACEHOLDER: &str = "Review medium-priority issues if any";

const CONSTRAINTS: &[&str] = &[
    "Maintain existing functionality - do not break features",
    "Prefer minimal changes over large refactors",
    "Test changes thoroughly before committing",
    "Consider iOS version compatibility of suggested fixes",
    "Preserve existing code style and patterns",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInstructions {
    pub task_description: String,
    /// `[severity] title` for every critical or high issue, in report order
    pub priority: Vec<String>,
    pub constraints: Vec<String>,
    pub success_criteria: Vec<String>,
    pub context: String,
}

fn task_description(health: HealthStatus) -> &'static str {
    match health {
        HealthStatus::Critical => "URGENT: Critical SwiftUI performance issues detected. Prioritize fixes to prevent frame drops and poor user experience.",
        HealthStatus::Warning => "SwiftUI performance issues detected that may impact user experience. Review and implement suggested fixes.",
        HealthStatus::Good => "Analyze the SwiftUI performance issues and implement fixes to improve rendering efficiency.",
    }
}

impl AgentInstructions {
    pub fn build(summary: &Summary, issues: &[Issue]) -> Self {
        let mut priority: Vec<String> = issues
            .iter()
            .filter(|i| i.severity.is_urgent())
            .map(|i| format!("[{}] {}", i.severity, i.title))
            .collect();
        if priority.is_empty() {
            priority.push(NO_PRIORITY_PLACEHOLDER.to_string());
        }

        let success_criteria = vec![
            "Reduce view update counts for flagged views".to_string(),
            "Eliminate or mitigate critical and high severity issues".to_string(),
            format!(
                "Improve performance score (current: {})",
                summary.performance_score
            ),
            "Verify fixes with Instruments after changes".to_string(),
        ];

        let context = format!(
            "SwiftUI performance analysis found {} issues ({} critical, {} high). \
             The cause-effect graph shows {} causes triggering {} state changes affecting {} views. \
             Focus on reducing unnecessary view updates and breaking cascade chains.",
            summary.issues_found,
            summary.critical_issues,
            summary.high_issues,
            summary.total_causes,
            summary.total_state_changes,
            summary.total_view_updates,
        );

        Self {
            task_description: task_description(summary.health_status).to_string(),
            priority,
            constraints: CONSTRAINTS.iter().map(|s| s.to_string()).collect(),
            success_criteria,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueType, Severity};

    fn summary(score: u32, health: HealthStatus) -> Summary {
        Summary {
            total_causes: 2,
            total_state_changes: 3,
            total_view_updates: 4,
            total_edges: 7,
            issues_found: 3,
            critical_issues: 1,
            high_issues: 1,
            performance_score: score,
            health_status: health,
        }
    }

    fn issue(severity: Severity, title: &str) -> Issue {
        Issue::new(IssueType::CascadingUpdate, severity, title, "d", "i", 0.75)
    }

    #[test]
    fn test_priority_lists_urgent_issues_in_order() {
        let issues = vec![
            issue(Severity::Critical, "ItemRow re-renders 50 times"),
            issue(Severity::High, "State fans out"),
            issue(Severity::Medium, "Whole object"),
        ];
        let block = AgentInstructions::build(&summary(62, HealthStatus::Warning), &issues);
        assert_eq!(
            block.priority,
            vec![
                "[critical] ItemRow re-renders 50 times",
                "[high] State fans out"
            ]
        );
    }

    #[test]
    fn test_priority_placeholder() {
        let issues = vec![issue(Severity::Medium, "m"), issue(Severity::Low, "l")];
        let block = AgentInstructions::build(&summary(94, HealthStatus::Good), &issues);
        assert_eq!(block.priority, vec![NO_PRIORITY_PLACEHOLDER]);
    }

    #[test]
    fn test_task_description_tiers() {
        let good = AgentInstructions::build(&summary(100, HealthStatus::Good), &[]);
        let warning = AgentInstructions::build(&summary(60, HealthStatus::Warning), &[]);
        let critical = AgentInstructions::build(&summary(10, HealthStatus::Critical), &[]);
        assert!(good.task_description.starts_with("Analyze"));
        assert!(warning.task_description.starts_with("SwiftUI performance issues"));
        assert!(critical.task_description.starts_with("URGENT"));
    }

    #[test]
    fn test_fixed_text_and_context() {
        let block = AgentInstructions::build(&summary(62, HealthStatus::Warning), &[]);
        assert_eq!(block.constraints.len(), 5);
        assert_eq!(
            block.success_criteria[2],
            "Improve performance score (current: 62)"
        );
        assert_eq!(
            block.context,
            "SwiftUI performance analysis found 3 issues (1 critical, 1 high). \
             The cause-effect graph shows 2 causes triggering 3 state changes affecting 4 views. \
             Focus on reducing unnecessary view updates and breaking cascade chains."
        );
    }
}
