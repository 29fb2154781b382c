//! Read projections - flattened aggregate state plus derived fields
//!
//! Consumed by collaborators (HTTP layer, UI) as plain serializable data.
//! Projections never mutate anything.

use crate::scoring::{self, RiskScore, DEFAULT_REVIEW_HORIZON_DAYS};
use crate::{Control, Framework, FrameworkId, ImplementationStatus, Risk, RiskId, RiskStatus, Severity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Percentage of controls with status `implemented`, 0.0-100.0.
///
/// Returns 0.0 when the slice is empty. The caller selects the controls
/// (typically one framework's worth).
pub fn implementation_rate(controls: &[Control]) -> f64 {
    if controls.is_empty() {
        return 0.0;
    }
    let implemented = controls
        .iter()
        .filter(|c| c.implementation_status() == ImplementationStatus::Implemented)
        .count();
    implemented as f64 / controls.len() as f64 * 100.0
}

/// Flattened framework state with its derived implementation rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkView {
    /// Framework identifier
    pub id: FrameworkId,
    /// Framework name
    pub name: String,
    /// Framework version label
    pub version: String,
    /// Framework description
    pub description: String,
    /// Whether the framework is active
    pub is_active: bool,
    /// Number of controls considered
    pub control_count: usize,
    /// Percentage of controls fully implemented
    pub implementation_rate: f64,
}

impl FrameworkView {
    /// Project a framework together with its controls.
    ///
    /// `controls` should be the framework's own controls; controls
    /// referencing another framework are ignored.
    pub fn project(framework: &Framework, controls: &[Control]) -> Self {
        let own: Vec<Control> = controls
            .iter()
            .filter(|c| c.framework_id == framework.id)
            .cloned()
            .collect();
        Self {
            id: framework.id,
            name: framework.name.as_str().to_string(),
            version: framework.version.as_str().to_string(),
            description: framework.description().to_string(),
            is_active: framework.is_active(),
            control_count: own.len(),
            implementation_rate: implementation_rate(&own),
        }
    }
}

/// Flattened risk state with derived scores and review flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    /// Risk identifier
    pub id: RiskId,
    /// Risk name
    pub name: String,
    /// Risk category label
    pub category: String,
    /// Lifecycle status
    pub status: RiskStatus,
    /// Score before mitigation
    pub inherent: RiskScore,
    /// Score after mitigation
    pub residual: RiskScore,
    /// Highest severity across the two scores
    pub severity: Severity,
    /// When the next review falls due
    pub next_review_date: Option<DateTime<Utc>>,
    /// Whether the next review date has passed
    pub review_due: bool,
    /// Whether the next review falls within the default horizon
    pub review_upcoming: bool,
    /// Whether the risk is active
    pub is_active: bool,
}

impl RiskView {
    /// Project a risk at a point in time.
    pub fn project(risk: &Risk, now: DateTime<Utc>) -> Self {
        let inherent = risk.inherent_score();
        let residual = risk.residual_score();
        Self {
            id: risk.id,
            name: risk.name().to_string(),
            category: risk.category().to_string(),
            status: risk.status(),
            inherent,
            residual,
            severity: inherent.severity.max(residual.severity),
            next_review_date: risk.next_review_date(),
            review_due: scoring::is_review_due(risk.next_review_date(), now),
            review_upcoming: scoring::is_review_upcoming(
                risk.next_review_date(),
                now,
                DEFAULT_REVIEW_HORIZON_DAYS,
            ),
            is_active: risk.is_active(),
        }
    }
}
