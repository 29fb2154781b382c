//! Attest Domain Layer
//!
//! This crate contains the compliance/risk (GRC) domain model: the value
//! objects, aggregates, and scoring rules that represent Frameworks,
//! Controls, Evidence, and Risks. Persistence, HTTP, and UI layers consume
//! this model through narrow interfaces and live in other crates.
//!
//! ## Key Concepts
//!
//! - **Framework**: a compliance framework (SOC 2, ISO 27001, ...) that
//!   controls reference by id
//! - **Control**: a single requirement with an operator-judged
//!   implementation status
//! - **Evidence**: a record backing one or more controls, reviewed
//!   pending -> approved/rejected
//! - **Risk**: inherent and residual (impact, likelihood) pairs plus the
//!   treatments applied to it
//! - **Scoring**: pure functions - ordinal product, severity banding,
//!   review-due computation
//!
//! ## Architecture
//!
//! - Every fallible constructor and mutation returns [`DomainResult`];
//!   expected failures are values, never panics
//! - A failed operation leaves prior aggregate state untouched
//! - Aggregates mutate only through named operations, never field pokes
//! - The core performs no I/O; concurrency control (revision checks,
//!   uniqueness constraints) belongs to the storage collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod control;
pub mod error;
pub mod evidence;
pub mod framework;
pub mod id;
pub mod projections;
pub mod risk;
pub mod scoring;
pub mod treatment;
pub mod values;

// Re-exports for convenience
pub use control::{Control, ImplementationStatus};
pub use error::{DomainError, DomainResult};
pub use evidence::{Evidence, EvidenceSource, FileMetadata, ReviewRecord, ReviewStatus};
pub use framework::Framework;
pub use id::{ControlId, EvidenceId, FrameworkId, RiskId, TreatmentId};
pub use projections::{implementation_rate, FrameworkView, RiskView};
pub use risk::{Risk, RiskOwner, RiskStatus, MAX_REVIEW_PERIOD_MONTHS};
pub use scoring::{
    is_review_due, is_review_upcoming, next_review_date, score, RiskScore, Severity,
    DEFAULT_REVIEW_HORIZON_DAYS,
};
pub use treatment::{RiskTreatment, TreatmentStatus, TreatmentType};
pub use values::{FrameworkName, FrameworkVersion, Impact, Likelihood};
