//! Risk treatment aggregate - an action taken against a risk
//!
//! A treatment belongs to exactly one risk; [`crate::Risk::add_treatment`]
//! enforces that it is attached to the risk it names.

use crate::{ControlId, DomainError, DomainResult, RiskId, TreatmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a risk is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    /// Accept the risk as-is
    Accept,
    /// Reduce the risk through controls
    Mitigate,
    /// Transfer the risk (e.g. insurance, outsourcing)
    Transfer,
    /// Avoid the activity creating the risk
    Avoid,
}

impl TreatmentType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentType::Accept => "accept",
            TreatmentType::Mitigate => "mitigate",
            TreatmentType::Transfer => "transfer",
            TreatmentType::Avoid => "avoid",
        }
    }

    /// Parse a type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "accept" => Some(TreatmentType::Accept),
            "mitigate" => Some(TreatmentType::Mitigate),
            "transfer" => Some(TreatmentType::Transfer),
            "avoid" => Some(TreatmentType::Avoid),
            _ => None,
        }
    }
}

impl std::str::FromStr for TreatmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid treatment type: {}", s))
    }
}

/// Progress status of a treatment
///
/// Plain enumeration with a permissive setter; operators correct status at
/// will.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    /// Planned but not started
    Planned,
    /// Work is underway
    InProgress,
    /// Finished
    Completed,
    /// Abandoned
    Cancelled,
}

impl TreatmentStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentStatus::Planned => "planned",
            TreatmentStatus::InProgress => "in_progress",
            TreatmentStatus::Completed => "completed",
            TreatmentStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planned" => Some(TreatmentStatus::Planned),
            "in_progress" => Some(TreatmentStatus::InProgress),
            "completed" => Some(TreatmentStatus::Completed),
            "cancelled" => Some(TreatmentStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::str::FromStr for TreatmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid treatment status: {}", s))
    }
}

/// A treatment applied to a risk
///
/// `completed_date` is advisory when status is not `completed`; the
/// permissive status setter never rejects the combination, and
/// [`RiskTreatment::complete`] is the consistent path that sets both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTreatment {
    /// Unique identifier
    pub id: TreatmentId,

    /// The risk this treatment belongs to
    pub risk_id: RiskId,

    /// Treatment name, non-empty
    name: String,

    /// Treatment description, non-empty
    description: String,

    /// How the risk is treated
    pub treatment_type: TreatmentType,

    /// Current progress status
    status: TreatmentStatus,

    /// When the treatment is due
    pub due_date: DateTime<Utc>,

    /// When the treatment finished, if it has
    completed_date: Option<DateTime<Utc>>,

    /// Assigned user, supplied explicitly by the caller
    assignee: Option<Uuid>,

    /// Controls implementing this treatment (unique)
    related_control_ids: Vec<ControlId>,
}

impl RiskTreatment {
    /// Create a treatment.
    ///
    /// # Errors
    /// Returns a validation failure if `name` or `description` is empty
    /// after trimming.
    pub fn new(
        risk_id: RiskId,
        name: impl Into<String>,
        description: impl Into<String>,
        treatment_type: TreatmentType,
        due_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("Treatment name cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Treatment description cannot be empty",
            ));
        }

        Ok(Self {
            id: TreatmentId::new(),
            risk_id,
            name,
            description,
            treatment_type,
            status: TreatmentStatus::Planned,
            due_date,
            completed_date: None,
            assignee: None,
            related_control_ids: Vec::new(),
        })
    }

    /// Treatment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Treatment description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current progress status.
    pub fn status(&self) -> TreatmentStatus {
        self.status
    }

    /// Completion date, if recorded.
    pub fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    /// Current assignee, if any.
    pub fn assignee(&self) -> Option<Uuid> {
        self.assignee
    }

    /// Controls implementing this treatment.
    pub fn related_control_ids(&self) -> &[ControlId] {
        &self.related_control_ids
    }

    /// Set the progress status. Permissive: any typed status is legal
    /// from any other.
    pub fn set_status(&mut self, status: TreatmentStatus) {
        self.status = status;
    }

    /// Mark the treatment completed, recording when.
    ///
    /// Sets status and completion date together so the two cannot drift.
    pub fn complete(&mut self, when: DateTime<Utc>) {
        self.status = TreatmentStatus::Completed;
        self.completed_date = Some(when);
    }

    /// Record a completion date without touching status. Advisory when
    /// status is not `completed`.
    pub fn set_completed_date(&mut self, when: Option<DateTime<Utc>>) {
        self.completed_date = when;
    }

    /// Assign the treatment to a user.
    pub fn assign(&mut self, assignee: Uuid) {
        self.assignee = Some(assignee);
    }

    /// Remove the current assignee.
    pub fn unassign(&mut self) {
        self.assignee = None;
    }

    /// Link a control implementing this treatment.
    ///
    /// # Errors
    /// Returns a rule violation if the control is already linked.
    pub fn link_control(&mut self, control_id: ControlId) -> DomainResult<()> {
        if self.related_control_ids.contains(&control_id) {
            return Err(DomainError::rule(format!(
                "Treatment is already linked to control {}",
                control_id
            )));
        }
        self.related_control_ids.push(control_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 30, 0, 0, 0).unwrap()
    }

    fn mitigation(risk_id: RiskId) -> RiskTreatment {
        RiskTreatment::new(
            risk_id,
            "Roll out MFA",
            "Enforce MFA for all privileged accounts",
            TreatmentType::Mitigate,
            due(),
        )
        .unwrap()
    }

    #[test]
    fn test_create_valid() {
        let treatment = mitigation(RiskId::new());
        assert_eq!(treatment.name(), "Roll out MFA");
        assert_eq!(
            treatment.description(),
            "Enforce MFA for all privileged accounts"
        );
        assert_eq!(treatment.status(), TreatmentStatus::Planned);
        assert!(treatment.completed_date().is_none());
        assert!(treatment.assignee().is_none());
    }

    #[test]
    fn test_create_rejects_empty_fields() {
        let risk = RiskId::new();
        assert_eq!(
            RiskTreatment::new(risk, " ", "d", TreatmentType::Accept, due())
                .unwrap_err()
                .to_string(),
            "Treatment name cannot be empty"
        );
        assert_eq!(
            RiskTreatment::new(risk, "n", "", TreatmentType::Accept, due())
                .unwrap_err()
                .to_string(),
            "Treatment description cannot be empty"
        );
    }

    #[test]
    fn test_complete_sets_both_fields() {
        let mut treatment = mitigation(RiskId::new());
        let when = due() - chrono::Duration::days(3);
        treatment.complete(when);
        assert_eq!(treatment.status(), TreatmentStatus::Completed);
        assert_eq!(treatment.completed_date(), Some(when));
    }

    #[test]
    fn test_status_is_permissive() {
        let mut treatment = mitigation(RiskId::new());
        treatment.set_status(TreatmentStatus::Cancelled);
        treatment.set_status(TreatmentStatus::InProgress);
        assert_eq!(treatment.status(), TreatmentStatus::InProgress);
    }

    #[test]
    fn test_completed_date_is_advisory() {
        // A stray completion date does not force the status
        let mut treatment = mitigation(RiskId::new());
        treatment.set_completed_date(Some(due()));
        assert_eq!(treatment.status(), TreatmentStatus::Planned);
        assert!(treatment.completed_date().is_some());
    }

    #[test]
    fn test_control_links_are_unique() {
        let mut treatment = mitigation(RiskId::new());
        let control = ControlId::new();
        treatment.link_control(control).unwrap();
        assert!(treatment.link_control(control).is_err());
        assert_eq!(treatment.related_control_ids().len(), 1);
    }

    #[test]
    fn test_assignment() {
        let mut treatment = mitigation(RiskId::new());
        let user = Uuid::now_v7();
        treatment.assign(user);
        assert_eq!(treatment.assignee(), Some(user));
        treatment.unassign();
        assert!(treatment.assignee().is_none());
    }
}
