//! Final report types produced by the scoring engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::url_utils::Subject;

/// Health of a single observed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Healthy,
    Warning,
    Risk,
    Unknown,
}

/// Direction a signal pushes the overall assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// One rubric line item, rendered for display.
#[derive(Debug, Clone, Serialize)]
pub struct SignalObservation {
    pub name: &'static str,
    pub status: SignalStatus,
    pub value: String,
    pub impact: Impact,
    pub explanation: String,
}

impl SignalObservation {
    /// The standard shape for a datum that could not be determined.
    pub fn unknown(name: &'static str, explanation: &str) -> Self {
        Self {
            name,
            status: SignalStatus::Unknown,
            value: "Unknown".to_string(),
            impact: Impact::Neutral,
            explanation: explanation.to_string(),
        }
    }
}

/// A category's percentage score plus its observations in rubric order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub score: u8,
    pub signals: Vec<SignalObservation>,
}

/// Overall verdict tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Caution,
    Risk,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Caution => "caution",
            HealthStatus::Risk => "risk",
        };
        f.write_str(label)
    }
}

/// The complete analysis result for one subject.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub subject: Subject,
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub status: HealthStatus,
    pub site: CategoryScore,
    pub engineering: CategoryScore,
    pub business: CategoryScore,
    pub narrative: String,
    pub correlation_id: Uuid,
}
