//! Performance scoring
//!
//! Collapses the issue list into a single 0-100 score and a health label.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = max(0, 100 - 25 × critical - 10 × high - 3 × other)
//!
//! Health:
//!   good     score >= 75
//!   warning  score >= 50
//!   critical otherwise
//! ```
//!
//! # Example
//!
//! Two critical issues and one low issue → 100 - 50 - 3 = 47 → critical.

use serde::{Deserialize, Serialize};

use crate::models::{Issue, Severity};

const CRITICAL_PENALTY: u32 = 25;
const HIGH_PENALTY: u32 = 10;
const OTHER_PENALTY: u32 = 3;

const GOOD_THRESHOLD: u32 = 75;
const WARNING_THRESHOLD: u32 = 50;

/// Overall health derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= GOOD_THRESHOLD {
            HealthStatus::Good
        } else if score >= WARNING_THRESHOLD {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Good => "good",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score with the penalty breakdown behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub score: u32,
    pub health: HealthStatus,
    pub critical: usize,
    pub high: usize,
    pub other: usize,
    /// Sum of penalties before flooring at zero
    pub penalty: u32,
}

impl ScoreBreakdown {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut critical = 0;
        let mut high = 0;
        let mut other = 0;
        for issue in issues {
            match issue.severity {
                Severity::Critical => critical += 1,
                Severity::High => high += 1,
                _ => other += 1,
            }
        }

        let penalty = (critical as u32)
            .saturating_mul(CRITICAL_PENALTY)
            .saturating_add((high as u32).saturating_mul(HIGH_PENALTY))
            .saturating_add((other as u32).saturating_mul(OTHER_PENALTY));
        let score = 100u32.saturating_sub(penalty);

        Self {
            score,
            health: HealthStatus::from_score(score),
            critical,
            high,
            other,
            penalty,
        }
    }
}

/// Performance score in 0..=100
pub fn performance_score(issues: &[Issue]) -> u32 {
    ScoreBreakdown::from_issues(issues).score
}
