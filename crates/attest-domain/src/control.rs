//! Control aggregate - a single requirement within a compliance framework

use crate::{ControlId, DomainError, DomainResult, FrameworkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Implementation status of a control
///
/// A plain enumeration with a permissive setter: status reflects current
/// operator judgment, not a workflow, so every status is reachable from
/// every other. Out-of-set strings are rejected at the intake boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationStatus {
    /// No implementation work has happened
    NotImplemented,
    /// Implementation has started but is incomplete
    PartiallyImplemented,
    /// The control is fully implemented
    Implemented,
}

impl ImplementationStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ImplementationStatus::NotImplemented => "not_implemented",
            ImplementationStatus::PartiallyImplemented => "partially_implemented",
            ImplementationStatus::Implemented => "implemented",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_implemented" => Some(ImplementationStatus::NotImplemented),
            "partially_implemented" => Some(ImplementationStatus::PartiallyImplemented),
            "implemented" => Some(ImplementationStatus::Implemented),
            _ => None,
        }
    }
}

impl std::str::FromStr for ImplementationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid implementation status: {}", s))
    }
}

/// A control belonging to exactly one framework
///
/// The framework is referenced by id, not owned. Uniqueness of `code`
/// within a framework is enforced by the storage collaborator through a
/// composite constraint on (framework_id, code); the aggregate only
/// validates non-emptiness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    /// Unique identifier
    pub id: ControlId,

    /// Framework this control belongs to
    pub framework_id: FrameworkId,

    /// Short code, e.g. "CC6.1" (unique per framework, enforced externally)
    code: String,

    /// Control title, non-empty
    title: String,

    /// Control description, non-empty
    description: String,

    /// Current implementation status
    implementation_status: ImplementationStatus,

    /// Free-text notes recorded alongside the latest status change
    implementation_notes: Option<String>,

    /// Owning user, supplied explicitly by the caller
    owner: Option<Uuid>,

    /// Category labels (unique, sorted)
    categories: BTreeSet<String>,

    /// Whether the control is active
    is_active: bool,
}

impl Control {
    /// Create a control.
    ///
    /// # Errors
    /// Returns a validation failure if `code`, `title`, or `description`
    /// is empty after trimming.
    pub fn new(
        framework_id: FrameworkId,
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        let code = code.into();
        let title = title.into();
        let description = description.into();

        if code.trim().is_empty() {
            return Err(DomainError::validation("Control code cannot be empty"));
        }
        if title.trim().is_empty() {
            return Err(DomainError::validation("Control title cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Control description cannot be empty",
            ));
        }

        Ok(Self {
            id: ControlId::new(),
            framework_id,
            code,
            title,
            description,
            implementation_status: ImplementationStatus::NotImplemented,
            implementation_notes: None,
            owner: None,
            categories: BTreeSet::new(),
            is_active: true,
        })
    }

    /// Short control code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Control title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Control description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category labels, unique and sorted.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Current implementation status.
    pub fn implementation_status(&self) -> ImplementationStatus {
        self.implementation_status
    }

    /// Notes recorded with the latest status change.
    pub fn implementation_notes(&self) -> Option<&str> {
        self.implementation_notes.as_deref()
    }

    /// Current owner, if any.
    pub fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    /// Whether the control is active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Record the current implementation status.
    ///
    /// Any typed status is legal from any other; invalid status strings
    /// never reach this method (intake rejects them).
    pub fn set_implementation(
        &mut self,
        status: ImplementationStatus,
        notes: Option<String>,
    ) {
        self.implementation_status = status;
        self.implementation_notes = notes;
    }

    /// Assign an owner. Identity arrives as an explicit argument, never
    /// from ambient state.
    pub fn assign_owner(&mut self, owner: Uuid) {
        self.owner = Some(owner);
    }

    /// Remove the current owner.
    pub fn clear_owner(&mut self) {
        self.owner = None;
    }

    /// Add a category label.
    ///
    /// # Errors
    /// Returns a rule violation if the category is already present.
    pub fn add_category(&mut self, category: impl Into<String>) -> DomainResult<()> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(DomainError::validation(
                "Control category cannot be empty",
            ));
        }
        if !self.categories.insert(category.clone()) {
            return Err(DomainError::rule(format!(
                "Control already has category '{}'",
                category
            )));
        }
        Ok(())
    }

    /// Remove a category label.
    ///
    /// # Errors
    /// Returns a rule violation if the category is not present.
    pub fn remove_category(&mut self, category: &str) -> DomainResult<()> {
        if !self.categories.remove(category) {
            return Err(DomainError::rule(format!(
                "Control does not have category '{}'",
                category
            )));
        }
        Ok(())
    }

    /// Activate the control. Idempotent, never fails.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivate the control. Idempotent, never fails.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
