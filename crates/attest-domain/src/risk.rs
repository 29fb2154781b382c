//! Risk aggregate - an organizational risk and its treatments
//!
//! A risk carries two scored pairs: inherent (before mitigation) and
//! residual (after). The scoring engine treats both identically; the
//! aggregate exposes each as a [`RiskScore`] projection.

use crate::scoring::{self, RiskScore};
use crate::{
    ControlId, DomainError, DomainResult, Impact, Likelihood, RiskId, RiskTreatment,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Longest accepted review cadence, in calendar months (a century).
/// Keeps derived review dates inside the representable date range.
pub const MAX_REVIEW_PERIOD_MONTHS: u32 = 1200;

/// Lifecycle status of a risk
///
/// Plain enumeration with a permissive setter: any status is reachable
/// from any other, matching operator-driven workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    /// Newly identified, not yet assessed
    Identified,
    /// Assessed for impact and likelihood
    Assessed,
    /// Treatments are in place
    Treated,
    /// Accepted without further treatment
    Accepted,
    /// No longer tracked
    Closed,
}

impl RiskStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Identified => "identified",
            RiskStatus::Assessed => "assessed",
            RiskStatus::Treated => "treated",
            RiskStatus::Accepted => "accepted",
            RiskStatus::Closed => "closed",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "identified" => Some(RiskStatus::Identified),
            "assessed" => Some(RiskStatus::Assessed),
            "treated" => Some(RiskStatus::Treated),
            "accepted" => Some(RiskStatus::Accepted),
            "closed" => Some(RiskStatus::Closed),
            _ => None,
        }
    }
}

impl std::str::FromStr for RiskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid risk status: {}", s))
    }
}

/// The person accountable for a risk
///
/// Supplied explicitly by the caller at creation, never read from ambient
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskOwner {
    /// Owner's user id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Organizational department
    pub department: String,
}

/// An organizational risk
///
/// Owns its treatments; references controls by id only. Invariants:
/// `name`, `description`, and `category` are non-empty;
/// `review_period_months` is between one and [`MAX_REVIEW_PERIOD_MONTHS`];
/// linked control ids are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Risk {
    /// Unique identifier
    pub id: RiskId,

    /// Risk name, non-empty
    name: String,

    /// Risk description, non-empty
    description: String,

    /// Risk category label (e.g. "operational", "security"), non-empty
    category: String,

    /// Impact before any mitigation
    inherent_impact: Impact,

    /// Likelihood before any mitigation
    inherent_likelihood: Likelihood,

    /// Impact remaining after mitigation
    residual_impact: Impact,

    /// Likelihood remaining after mitigation
    residual_likelihood: Likelihood,

    /// Lifecycle status
    status: RiskStatus,

    /// Accountable owner
    pub owner: RiskOwner,

    /// Mitigating controls (unique, may be empty)
    related_control_ids: Vec<ControlId>,

    /// Review cadence in calendar months, at least one
    review_period_months: u32,

    /// When the next review falls due, derived from the last review
    next_review_date: Option<DateTime<Utc>>,

    /// When the risk was last reviewed
    last_review_date: Option<DateTime<Utc>>,

    /// Free-form tags (unique, sorted)
    tags: BTreeSet<String>,

    /// Whether the risk is active
    is_active: bool,

    /// Treatments applied to this risk
    treatments: Vec<RiskTreatment>,
}

impl Risk {
    /// Create a risk.
    ///
    /// # Errors
    /// Returns a validation failure if `name`, `description`, or
    /// `category` is empty after trimming, or if `review_period_months`
    /// is zero or above [`MAX_REVIEW_PERIOD_MONTHS`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        inherent_impact: Impact,
        inherent_likelihood: Likelihood,
        residual_impact: Impact,
        residual_likelihood: Likelihood,
        owner: RiskOwner,
        review_period_months: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        let description = description.into();
        let category = category.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("Risk name cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation("Risk description cannot be empty"));
        }
        if category.trim().is_empty() {
            return Err(DomainError::validation("Risk category cannot be empty"));
        }
        if review_period_months < 1 {
            return Err(DomainError::validation(
                "Risk review period must be at least one month",
            ));
        }
        if review_period_months > MAX_REVIEW_PERIOD_MONTHS {
            return Err(DomainError::validation(format!(
                "Risk review period cannot exceed {} months",
                MAX_REVIEW_PERIOD_MONTHS
            )));
        }

        Ok(Self {
            id: RiskId::new(),
            name,
            description,
            category,
            inherent_impact,
            inherent_likelihood,
            residual_impact,
            residual_likelihood,
            status: RiskStatus::Identified,
            owner,
            related_control_ids: Vec::new(),
            review_period_months,
            next_review_date: None,
            last_review_date: None,
            tags: BTreeSet::new(),
            is_active: true,
            treatments: Vec::new(),
        })
    }

    /// Risk name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Risk description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Risk category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-form tags, unique and sorted.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Inherent (impact, likelihood) pair.
    pub fn inherent(&self) -> (Impact, Likelihood) {
        (self.inherent_impact, self.inherent_likelihood)
    }

    /// Residual (impact, likelihood) pair.
    pub fn residual(&self) -> (Impact, Likelihood) {
        (self.residual_impact, self.residual_likelihood)
    }

    /// Score of the risk before mitigation.
    pub fn inherent_score(&self) -> RiskScore {
        RiskScore::rate(self.inherent_impact, self.inherent_likelihood)
    }

    /// Score of the risk after mitigation.
    pub fn residual_score(&self) -> RiskScore {
        RiskScore::rate(self.residual_impact, self.residual_likelihood)
    }

    /// Current lifecycle status.
    pub fn status(&self) -> RiskStatus {
        self.status
    }

    /// Review cadence in calendar months.
    pub fn review_period_months(&self) -> u32 {
        self.review_period_months
    }

    /// When the next review falls due, if one is scheduled.
    pub fn next_review_date(&self) -> Option<DateTime<Utc>> {
        self.next_review_date
    }

    /// When the risk was last reviewed.
    pub fn last_review_date(&self) -> Option<DateTime<Utc>> {
        self.last_review_date
    }

    /// Linked control ids.
    pub fn related_control_ids(&self) -> &[ControlId] {
        &self.related_control_ids
    }

    /// Treatments applied to this risk.
    pub fn treatments(&self) -> &[RiskTreatment] {
        &self.treatments
    }

    /// Whether the risk is active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Set the lifecycle status. Permissive: any typed status is legal
    /// from any other.
    pub fn set_status(&mut self, status: RiskStatus) {
        self.status = status;
    }

    /// Replace both scored pairs in one reassessment.
    pub fn reassess(
        &mut self,
        inherent_impact: Impact,
        inherent_likelihood: Likelihood,
        residual_impact: Impact,
        residual_likelihood: Likelihood,
    ) {
        self.inherent_impact = inherent_impact;
        self.inherent_likelihood = inherent_likelihood;
        self.residual_impact = residual_impact;
        self.residual_likelihood = residual_likelihood;
    }

    /// Record a completed review, deriving the next review date from the
    /// review period. A next date that would fall outside the
    /// representable range is left unscheduled.
    pub fn mark_reviewed(&mut self, now: DateTime<Utc>) {
        self.last_review_date = Some(now);
        self.next_review_date = scoring::next_review_date(now, self.review_period_months);
    }

    /// Change the review cadence. The next review date is re-derived from
    /// the last review, when one exists.
    ///
    /// # Errors
    /// Returns a validation failure if `months` is zero or above
    /// [`MAX_REVIEW_PERIOD_MONTHS`].
    pub fn set_review_period(&mut self, months: u32) -> DomainResult<()> {
        if months < 1 {
            return Err(DomainError::validation(
                "Risk review period must be at least one month",
            ));
        }
        if months > MAX_REVIEW_PERIOD_MONTHS {
            return Err(DomainError::validation(format!(
                "Risk review period cannot exceed {} months",
                MAX_REVIEW_PERIOD_MONTHS
            )));
        }
        self.review_period_months = months;
        if let Some(last) = self.last_review_date {
            self.next_review_date = scoring::next_review_date(last, months);
        }
        Ok(())
    }

    /// Link a mitigating control.
    ///
    /// # Errors
    /// Returns a rule violation if the control is already linked.
    pub fn link_control(&mut self, control_id: ControlId) -> DomainResult<()> {
        if self.related_control_ids.contains(&control_id) {
            return Err(DomainError::rule(format!(
                "Risk is already linked to control {}",
                control_id
            )));
        }
        self.related_control_ids.push(control_id);
        Ok(())
    }

    /// Unlink a control.
    ///
    /// # Errors
    /// Returns a rule violation if the control is not linked.
    pub fn unlink_control(&mut self, control_id: ControlId) -> DomainResult<()> {
        let Some(position) = self
            .related_control_ids
            .iter()
            .position(|id| *id == control_id)
        else {
            return Err(DomainError::rule(format!(
                "Risk is not linked to control {}",
                control_id
            )));
        };
        self.related_control_ids.remove(position);
        Ok(())
    }

    /// Attach a treatment. Treatments accumulate without a cardinality
    /// limit.
    ///
    /// # Errors
    /// Returns a rule violation if the treatment names a different risk.
    pub fn add_treatment(&mut self, treatment: RiskTreatment) -> DomainResult<()> {
        if treatment.risk_id != self.id {
            return Err(DomainError::rule("Treatment belongs to a different risk"));
        }
        self.treatments.push(treatment);
        Ok(())
    }

    /// Add a tag.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Activate the risk. Idempotent, never fails.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivate the risk. Idempotent, never fails.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Severity, TreatmentType};
    use chrono::TimeZone;

    fn owner() -> RiskOwner {
        RiskOwner {
            id: Uuid::now_v7(),
            name: "Dana Reyes".to_string(),
            department: "Security".to_string(),
        }
    }

    fn breach_risk() -> Risk {
        Risk::new(
            "Customer data breach",
            "Unauthorized access to customer records",
            "security",
            Impact::Severe,
            Likelihood::AlmostCertain,
            Impact::Minor,
            Likelihood::Unlikely,
            owner(),
            6,
        )
        .unwrap()
    }

    #[test]
    fn test_create_valid() {
        let risk = breach_risk();
        assert_eq!(risk.status(), RiskStatus::Identified);
        assert_eq!(risk.review_period_months(), 6);
        assert!(risk.is_active());
        assert!(risk.next_review_date().is_none());
        assert!(risk.treatments().is_empty());
    }

    #[test]
    fn test_create_rejects_empty_fields() {
        let cases = [
            ("", "d", "c", "Risk name cannot be empty"),
            ("n", " ", "c", "Risk description cannot be empty"),
            ("n", "d", "", "Risk category cannot be empty"),
        ];
        for (name, description, category, message) in cases {
            let err = Risk::new(
                name,
                description,
                category,
                Impact::Minor,
                Likelihood::Rare,
                Impact::Minor,
                Likelihood::Rare,
                owner(),
                12,
            )
            .unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_field_accessors() {
        let risk = breach_risk();
        assert_eq!(risk.name(), "Customer data breach");
        assert_eq!(risk.description(), "Unauthorized access to customer records");
        assert_eq!(risk.category(), "security");
        assert!(risk.tags().is_empty());
    }

    #[test]
    fn test_create_rejects_zero_review_period() {
        let err = Risk::new(
            "n",
            "d",
            "c",
            Impact::Minor,
            Likelihood::Rare,
            Impact::Minor,
            Likelihood::Rare,
            owner(),
            0,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Risk review period must be at least one month"
        );
    }

    #[test]
    fn test_create_rejects_excessive_review_period() {
        for months in [MAX_REVIEW_PERIOD_MONTHS + 1, u32::MAX] {
            let err = Risk::new(
                "n",
                "d",
                "c",
                Impact::Minor,
                Likelihood::Rare,
                Impact::Minor,
                Likelihood::Rare,
                owner(),
                months,
            )
            .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Risk review period cannot exceed 1200 months"
            );
        }
    }

    #[test]
    fn test_mark_reviewed_never_panics_at_period_bounds() {
        let mut risk = breach_risk();
        risk.set_review_period(MAX_REVIEW_PERIOD_MONTHS).unwrap();
        risk.mark_reviewed(Utc::now());
        assert!(risk.next_review_date().is_some());

        let err = risk.set_review_period(u32::MAX).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(risk.review_period_months(), MAX_REVIEW_PERIOD_MONTHS);
    }

    #[test]
    fn test_treatment_effectiveness_visible_in_scores() {
        let risk = breach_risk();

        let inherent = risk.inherent_score();
        assert_eq!(inherent.value, 25);
        assert_eq!(inherent.severity, Severity::Critical);

        let residual = risk.residual_score();
        assert_eq!(residual.value, 2);
        assert_eq!(residual.severity, Severity::Low);
    }

    #[test]
    fn test_status_is_permissive() {
        let mut risk = breach_risk();
        risk.set_status(RiskStatus::Closed);
        // Reverse transitions are legal
        risk.set_status(RiskStatus::Identified);
        assert_eq!(risk.status(), RiskStatus::Identified);
    }

    #[test]
    fn test_reassess() {
        let mut risk = breach_risk();
        risk.reassess(
            Impact::Moderate,
            Likelihood::Possible,
            Impact::Insignificant,
            Likelihood::Rare,
        );
        assert_eq!(risk.inherent_score().value, 9);
        assert_eq!(risk.residual_score().value, 1);
    }

    #[test]
    fn test_mark_reviewed_derives_next_date() {
        let mut risk = breach_risk();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        risk.mark_reviewed(now);

        assert_eq!(risk.last_review_date(), Some(now));
        assert_eq!(
            risk.next_review_date(),
            Some(Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_set_review_period_rederives_next_date() {
        let mut risk = breach_risk();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        risk.mark_reviewed(now);

        risk.set_review_period(1).unwrap();
        assert_eq!(
            risk.next_review_date(),
            Some(Utc.with_ymd_and_hms(2024, 4, 15, 10, 0, 0).unwrap())
        );

        assert!(risk.set_review_period(0).is_err());
        assert_eq!(risk.review_period_months(), 1);
    }

    #[test]
    fn test_control_links_are_unique() {
        let mut risk = breach_risk();
        let control = ControlId::new();
        risk.link_control(control).unwrap();

        let err = risk.link_control(control).unwrap_err();
        assert!(matches!(err, DomainError::RuleViolation(_)));
        assert_eq!(risk.related_control_ids().len(), 1);

        risk.unlink_control(control).unwrap();
        assert!(risk.related_control_ids().is_empty());
        assert!(risk.unlink_control(control).is_err());
    }

    #[test]
    fn test_add_treatment_checks_ownership() {
        let mut risk = breach_risk();
        let due = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        let mine =
            RiskTreatment::new(risk.id, "MFA", "Enforce MFA", TreatmentType::Mitigate, due)
                .unwrap();
        risk.add_treatment(mine).unwrap();
        assert_eq!(risk.treatments().len(), 1);

        let foreign = RiskTreatment::new(
            RiskId::new(),
            "Insurance",
            "Cyber insurance",
            TreatmentType::Transfer,
            due,
        )
        .unwrap();
        let err = risk.add_treatment(foreign).unwrap_err();
        assert_eq!(err.to_string(), "Treatment belongs to a different risk");
        assert_eq!(risk.treatments().len(), 1);
    }

    #[test]
    fn test_treatments_accumulate() {
        let mut risk = breach_risk();
        let due = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        for i in 0..4 {
            let treatment = RiskTreatment::new(
                risk.id,
                format!("Treatment {}", i),
                "step",
                TreatmentType::Mitigate,
                due,
            )
            .unwrap();
            risk.add_treatment(treatment).unwrap();
        }
        assert_eq!(risk.treatments().len(), 4);
    }

    #[test]
    fn test_tags_are_unique() {
        let mut risk = breach_risk();
        risk.add_tag("pii");
        risk.add_tag("pii");
        assert_eq!(risk.tags().len(), 1);
    }
}
