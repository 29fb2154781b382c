//! Evidence aggregate - a record supporting one or more controls
//!
//! Evidence and controls reference each other symmetrically by id; neither
//! owns the other. The aggregate records file metadata only - file bytes
//! never pass through the domain core.

use crate::{ControlId, DomainError, DomainResult, EvidenceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a piece of evidence was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Provided manually by an operator
    Manual,
    /// Pulled from a connected integration
    Integration,
    /// Collected by an automated job
    Automated,
}

impl EvidenceSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceSource::Manual => "manual",
            EvidenceSource::Integration => "integration",
            EvidenceSource::Automated => "automated",
        }
    }

    /// Parse a source from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manual" => Some(EvidenceSource::Manual),
            "integration" => Some(EvidenceSource::Integration),
            "automated" => Some(EvidenceSource::Automated),
            _ => None,
        }
    }
}

impl std::str::FromStr for EvidenceSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid evidence source: {}", s))
    }
}

/// Review status of evidence
///
/// `pending -> approved` and `pending -> rejected` are the only forward
/// transitions; both targets are terminal. [`Evidence::reopen`] is the
/// single way back to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting a review decision
    Pending,
    /// Approved by a reviewer (terminal until reopened)
    Approved,
    /// Rejected by a reviewer (terminal until reopened)
    Rejected,
}

impl ReviewStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid review status: {}", s))
    }
}

/// Metadata about an attached file - never the file content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Where the file lives (the storage collaborator owns the bytes)
    pub url: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// MIME type, e.g. "application/pdf"
    pub content_type: String,
}

/// A recorded review decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    /// Who made the decision (explicit actor, never ambient state)
    pub reviewer: Uuid,
    /// When the decision was made
    pub reviewed_at: DateTime<Utc>,
    /// Free-text reviewer notes
    pub notes: Option<String>,
}

/// Evidence supporting one or more controls
///
/// Invariants: at least one linked control at all times; if an expiration
/// date is present it is never earlier than the collection date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    /// Unique identifier
    pub id: EvidenceId,

    /// Linked controls (unique, at least one)
    control_ids: Vec<ControlId>,

    /// Evidence title, non-empty
    title: String,

    /// Evidence description, non-empty
    description: String,

    /// How the evidence was collected
    pub source: EvidenceSource,

    /// Current review status
    status: ReviewStatus,

    /// When the evidence was collected
    collection_date: DateTime<Utc>,

    /// When the evidence stops being valid, if bounded
    expiration_date: Option<DateTime<Utc>>,

    /// Attached file metadata, if any
    pub file: Option<FileMetadata>,

    /// The recorded review decision while in a terminal status
    review: Option<ReviewRecord>,
}

impl Evidence {
    /// Create an evidence record.
    ///
    /// Duplicate ids in `control_ids` are collapsed.
    ///
    /// # Errors
    /// Fails if no controls are linked, if `title` or `description` is
    /// empty after trimming, or if `expiration_date` precedes
    /// `collection_date`.
    pub fn new(
        control_ids: Vec<ControlId>,
        title: impl Into<String>,
        description: impl Into<String>,
        source: EvidenceSource,
        collection_date: DateTime<Utc>,
        expiration_date: Option<DateTime<Utc>>,
        file: Option<FileMetadata>,
    ) -> DomainResult<Self> {
        let title = title.into();
        let description = description.into();

        let mut unique_controls: Vec<ControlId> = Vec::with_capacity(control_ids.len());
        for id in control_ids {
            if !unique_controls.contains(&id) {
                unique_controls.push(id);
            }
        }

        if unique_controls.is_empty() {
            return Err(DomainError::validation(
                "Evidence must be linked to at least one control",
            ));
        }
        if title.trim().is_empty() {
            return Err(DomainError::validation("Evidence title cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Evidence description cannot be empty",
            ));
        }
        if let Some(expiration) = expiration_date {
            if expiration < collection_date {
                return Err(DomainError::validation(
                    "Evidence expiration date cannot precede collection date",
                ));
            }
        }

        Ok(Self {
            id: EvidenceId::new(),
            control_ids: unique_controls,
            title,
            description,
            source,
            status: ReviewStatus::Pending,
            collection_date,
            expiration_date,
            file,
            review: None,
        })
    }

    /// Linked control ids.
    pub fn control_ids(&self) -> &[ControlId] {
        &self.control_ids
    }

    /// Evidence title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Evidence description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the evidence was collected.
    pub fn collection_date(&self) -> DateTime<Utc> {
        self.collection_date
    }

    /// When the evidence stops being valid, if bounded.
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Current review status.
    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// The recorded review decision, present only in a terminal status.
    pub fn review(&self) -> Option<&ReviewRecord> {
        self.review.as_ref()
    }

    /// Link this evidence to another control.
    ///
    /// # Errors
    /// Returns a rule violation if the control is already linked.
    pub fn link_control(&mut self, control_id: ControlId) -> DomainResult<()> {
        if self.control_ids.contains(&control_id) {
            return Err(DomainError::rule(format!(
                "Evidence is already linked to control {}",
                control_id
            )));
        }
        self.control_ids.push(control_id);
        Ok(())
    }

    /// Unlink a control.
    ///
    /// # Errors
    /// Returns a rule violation if the control is not linked, or if
    /// unlinking would leave the evidence with no controls.
    pub fn unlink_control(&mut self, control_id: ControlId) -> DomainResult<()> {
        let Some(position) = self.control_ids.iter().position(|id| *id == control_id) else {
            return Err(DomainError::rule(format!(
                "Evidence is not linked to control {}",
                control_id
            )));
        };
        if self.control_ids.len() == 1 {
            return Err(DomainError::rule(
                "Evidence must remain linked to at least one control",
            ));
        }
        self.control_ids.remove(position);
        Ok(())
    }

    /// Approve the evidence.
    ///
    /// A one-shot decision from `pending`; records reviewer identity,
    /// timestamp, and notes.
    ///
    /// # Errors
    /// Returns a rule violation if the evidence is not pending.
    pub fn approve(
        &mut self,
        reviewer: Uuid,
        reviewed_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> DomainResult<()> {
        self.decide(ReviewStatus::Approved, reviewer, reviewed_at, notes)
    }

    /// Reject the evidence. Same contract as [`Evidence::approve`].
    ///
    /// # Errors
    /// Returns a rule violation if the evidence is not pending.
    pub fn reject(
        &mut self,
        reviewer: Uuid,
        reviewed_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> DomainResult<()> {
        self.decide(ReviewStatus::Rejected, reviewer, reviewed_at, notes)
    }

    fn decide(
        &mut self,
        decision: ReviewStatus,
        reviewer: Uuid,
        reviewed_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> DomainResult<()> {
        if self.status != ReviewStatus::Pending {
            return Err(DomainError::rule("Evidence has already been reviewed"));
        }
        self.status = decision;
        self.review = Some(ReviewRecord {
            reviewer,
            reviewed_at,
            notes,
        });
        Ok(())
    }

    /// Return reviewed evidence to `pending`, clearing the prior decision.
    ///
    /// # Errors
    /// Returns a rule violation if the evidence is still pending.
    pub fn reopen(&mut self) -> DomainResult<()> {
        if self.status == ReviewStatus::Pending {
            return Err(DomainError::rule("Evidence is not in a reviewed state"));
        }
        self.status = ReviewStatus::Pending;
        self.review = None;
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    proptest! {
        /// Property: any evidence the factory accepts satisfies the
        /// validity-window invariant.
        #[test]
        fn test_accepted_window_is_valid(
            collection_offset_days in 0i64..3650,
            expiration_offset_days in -3650i64..3650,
            bounded in proptest::bool::ANY,
        ) {
            let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
            let collection = base + chrono::Duration::days(collection_offset_days);
            let expiration = bounded
                .then(|| collection + chrono::Duration::days(expiration_offset_days));

            let result = Evidence::new(
                vec![ControlId::new()],
                "t",
                "d",
                EvidenceSource::Manual,
                collection,
                expiration,
                None,
            );

            match result {
                Ok(evidence) => {
                    prop_assert!(evidence
                        .expiration_date()
                        .map_or(true, |e| e >= evidence.collection_date()));
                }
                Err(_) => {
                    prop_assert!(bounded && expiration_offset_days < 0);
                }
            }
        }
    }
}
