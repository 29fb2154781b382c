//! Attest Intake
//!
//! Boundary validation between request parsing and the domain core.
//!
//! Status, source, impact, and likelihood values are closed enumerations;
//! this crate rejects any value outside the enumerated set before the
//! core is touched, then delegates the remaining invariants to the
//! domain factories.
//!
//! # Examples
//!
//! ```no_run
//! use attest_intake::{parse_framework, FrameworkPayload};
//!
//! let payload: FrameworkPayload = serde_json::from_str(
//!     r#"{"name": "SOC 2", "version": "2022", "description": "Trust services criteria"}"#
//! ).unwrap();
//! let framework = parse_framework(payload).unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod payload;

pub use error::IntakeError;
pub use payload::{
    ControlPayload, EvidencePayload, FilePayload, FrameworkPayload, OwnerPayload, RiskPayload,
    TreatmentPayload,
};

use attest_domain::{
    Control, ControlId, Evidence, EvidenceSource, FileMetadata, Framework, FrameworkName,
    FrameworkVersion, Impact, ImplementationStatus, Likelihood, Risk, RiskId, RiskOwner,
    RiskStatus, RiskTreatment, TreatmentStatus, TreatmentType,
};
use tracing::{debug, warn};

/// Build a [`Framework`] from an inbound payload.
///
/// # Errors
/// Returns an error if any value-object or aggregate invariant fails.
pub fn parse_framework(payload: FrameworkPayload) -> Result<Framework, IntakeError> {
    let name = FrameworkName::new(payload.name)?;
    let version = FrameworkVersion::new(payload.version)?;
    let framework = Framework::new(name, version, payload.description, payload.is_active)?;
    debug!(framework = %framework.id, "framework payload accepted");
    Ok(framework)
}

/// Build a [`Control`] from an inbound payload.
///
/// # Errors
/// Returns an error if a required field is empty or a category repeats.
pub fn parse_control(payload: ControlPayload) -> Result<Control, IntakeError> {
    let mut control = Control::new(
        payload.framework_id.into(),
        payload.code,
        payload.title,
        payload.description,
    )?;
    if let Some(owner) = payload.owner {
        control.assign_owner(owner);
    }
    for category in payload.categories {
        control.add_category(category)?;
    }
    debug!(control = %control.id, "control payload accepted");
    Ok(control)
}

/// Build an [`Evidence`] record from an inbound payload.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for an out-of-set `source`, or a
/// domain error for a failed aggregate invariant.
pub fn parse_evidence(payload: EvidencePayload) -> Result<Evidence, IntakeError> {
    let source = EvidenceSource::parse(&payload.source).ok_or_else(|| {
        warn!(value = %payload.source, "rejected evidence source outside closed set");
        IntakeError::unknown("source", &payload.source)
    })?;
    let control_ids: Vec<ControlId> = payload.control_ids.into_iter().map(Into::into).collect();
    let file = payload.file.map(|f| FileMetadata {
        url: f.url,
        size_bytes: f.size_bytes,
        content_type: f.content_type,
    });
    let evidence = Evidence::new(
        control_ids,
        payload.title,
        payload.description,
        source,
        payload.collection_date,
        payload.expiration_date,
        file,
    )?;
    debug!(evidence = %evidence.id, "evidence payload accepted");
    Ok(evidence)
}

/// Build a [`Risk`] from an inbound payload.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for an out-of-set impact or
/// likelihood, or a domain error for a failed aggregate invariant.
pub fn parse_risk(payload: RiskPayload) -> Result<Risk, IntakeError> {
    let inherent_impact = parse_impact("inherent_impact", &payload.inherent_impact)?;
    let inherent_likelihood =
        parse_likelihood("inherent_likelihood", &payload.inherent_likelihood)?;
    let residual_impact = parse_impact("residual_impact", &payload.residual_impact)?;
    let residual_likelihood =
        parse_likelihood("residual_likelihood", &payload.residual_likelihood)?;

    let mut risk = Risk::new(
        payload.name,
        payload.description,
        payload.category,
        inherent_impact,
        inherent_likelihood,
        residual_impact,
        residual_likelihood,
        RiskOwner {
            id: payload.owner.id,
            name: payload.owner.name,
            department: payload.owner.department,
        },
        payload.review_period_months,
    )?;
    for tag in payload.tags {
        risk.add_tag(tag);
    }
    debug!(risk = %risk.id, "risk payload accepted");
    Ok(risk)
}

/// Build a [`RiskTreatment`] from an inbound payload.
///
/// The caller attaches the result to its risk via
/// [`Risk::add_treatment`], which checks the `risk_id` matches.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for an out-of-set
/// `treatment_type`, or a domain error for a failed aggregate invariant.
pub fn parse_treatment(payload: TreatmentPayload) -> Result<RiskTreatment, IntakeError> {
    let treatment_type = TreatmentType::parse(&payload.treatment_type).ok_or_else(|| {
        warn!(value = %payload.treatment_type, "rejected treatment type outside closed set");
        IntakeError::unknown("treatment_type", &payload.treatment_type)
    })?;
    let risk_id: RiskId = payload.risk_id.into();
    let mut treatment = RiskTreatment::new(
        risk_id,
        payload.name,
        payload.description,
        treatment_type,
        payload.due_date,
    )?;
    if let Some(assignee) = payload.assignee {
        treatment.assign(assignee);
    }
    debug!(treatment = %treatment.id, "treatment payload accepted");
    Ok(treatment)
}

/// Parse an implementation status string for a control update.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for a value outside
/// `not_implemented | partially_implemented | implemented`.
pub fn parse_implementation_status(
    value: &str,
) -> Result<ImplementationStatus, IntakeError> {
    ImplementationStatus::parse(value).ok_or_else(|| {
        warn!(value, "rejected implementation status outside closed set");
        IntakeError::unknown("implementation_status", value)
    })
}

/// Parse a risk status string for a status update.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for a value outside
/// `identified | assessed | treated | accepted | closed`.
pub fn parse_risk_status(value: &str) -> Result<RiskStatus, IntakeError> {
    RiskStatus::parse(value).ok_or_else(|| {
        warn!(value, "rejected risk status outside closed set");
        IntakeError::unknown("status", value)
    })
}

/// Parse a treatment status string for a status update.
///
/// # Errors
/// Returns [`IntakeError::UnknownValue`] for a value outside
/// `planned | in_progress | completed | cancelled`.
pub fn parse_treatment_status(value: &str) -> Result<TreatmentStatus, IntakeError> {
    TreatmentStatus::parse(value).ok_or_else(|| {
        warn!(value, "rejected treatment status outside closed set");
        IntakeError::unknown("status", value)
    })
}

fn parse_impact(field: &'static str, value: &str) -> Result<Impact, IntakeError> {
    Impact::parse(value).ok_or_else(|| {
        warn!(field, value, "rejected impact outside closed set");
        IntakeError::unknown(field, value)
    })
}

fn parse_likelihood(field: &'static str, value: &str) -> Result<Likelihood, IntakeError> {
    Likelihood::parse(value).ok_or_else(|| {
        warn!(field, value, "rejected likelihood outside closed set");
        IntakeError::unknown(field, value)
    })
}
