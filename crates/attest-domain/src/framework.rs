//! Framework aggregate - a compliance framework such as SOC 2 or ISO 27001

use crate::{DomainError, DomainResult, FrameworkId, FrameworkName, FrameworkVersion};
use serde::Serialize;

/// A compliance framework
///
/// Controls reference a framework by id; the framework does not own them,
/// and deleting a framework does not cascade here - that policy belongs to
/// the storage collaborator.
///
/// Invariant: `description` is non-empty after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Framework {
    /// Unique identifier
    pub id: FrameworkId,

    /// Framework name (validated value object)
    pub name: FrameworkName,

    /// Framework version label
    pub version: FrameworkVersion,

    /// Free-text description, never empty
    description: String,

    /// Whether the framework is active
    is_active: bool,
}

impl Framework {
    /// Create a framework.
    ///
    /// `name` and `version` arrive already validated as value objects;
    /// the factory validates the description.
    ///
    /// # Errors
    /// Returns a validation failure if `description` is empty after
    /// trimming.
    pub fn new(
        name: FrameworkName,
        version: FrameworkVersion,
        description: impl Into<String>,
        is_active: bool,
    ) -> DomainResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Framework description cannot be empty",
            ));
        }
        Ok(Self {
            id: FrameworkId::new(),
            name,
            version,
            description,
            is_active,
        })
    }

    /// Current description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the framework is active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Activate the framework. Idempotent, never fails.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivate the framework. Idempotent, never fails.
    ///
    /// Deactivation is reversible only through [`Framework::activate`];
    /// nothing revives a framework implicitly.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Replace the description.
    ///
    /// # Errors
    /// Returns a validation failure if `text` is empty after trimming; the
    /// prior description is left unchanged.
    pub fn update_description(&mut self, text: impl Into<String>) -> DomainResult<()> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "Framework description cannot be empty",
            ));
        }
        self.description = text;
        Ok(())
    }
}
