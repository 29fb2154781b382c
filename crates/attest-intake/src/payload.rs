//! Inbound construction payloads
//!
//! Shapes the HTTP layer hands over after request parsing. Enumerated
//! fields arrive as strings and are checked against their closed sets
//! here, before anything reaches the domain core.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Payload for creating a framework
#[derive(Debug, Clone, Deserialize)]
pub struct FrameworkPayload {
    /// Framework name
    pub name: String,
    /// Framework version label
    pub version: String,
    /// Framework description
    pub description: String,
    /// Whether the framework starts active
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Payload for creating a control
#[derive(Debug, Clone, Deserialize)]
pub struct ControlPayload {
    /// Framework the control belongs to
    pub framework_id: Uuid,
    /// Short control code, e.g. "CC6.1"
    pub code: String,
    /// Control title
    pub title: String,
    /// Control description
    pub description: String,
    /// Optional owner id
    #[serde(default)]
    pub owner: Option<Uuid>,
    /// Category labels
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Payload for creating an evidence record
#[derive(Debug, Clone, Deserialize)]
pub struct EvidencePayload {
    /// Controls the evidence supports (at least one)
    pub control_ids: Vec<Uuid>,
    /// Evidence title
    pub title: String,
    /// Evidence description
    pub description: String,
    /// Collection source: manual | integration | automated
    pub source: String,
    /// When the evidence was collected
    pub collection_date: DateTime<Utc>,
    /// When the evidence stops being valid, if bounded
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Attached file metadata, if any
    #[serde(default)]
    pub file: Option<FilePayload>,
}

/// File metadata attached to evidence - never file content
#[derive(Debug, Clone, Deserialize)]
pub struct FilePayload {
    /// Where the file lives
    pub url: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// MIME type
    pub content_type: String,
}

/// Payload for creating a risk
#[derive(Debug, Clone, Deserialize)]
pub struct RiskPayload {
    /// Risk name
    pub name: String,
    /// Risk description
    pub description: String,
    /// Risk category label
    pub category: String,
    /// Inherent impact: insignificant | minor | moderate | major | severe
    pub inherent_impact: String,
    /// Inherent likelihood: rare | unlikely | possible | likely | almost_certain
    pub inherent_likelihood: String,
    /// Residual impact, same set as inherent
    pub residual_impact: String,
    /// Residual likelihood, same set as inherent
    pub residual_likelihood: String,
    /// Accountable owner
    pub owner: OwnerPayload,
    /// Review cadence in calendar months
    pub review_period_months: u32,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Owner identity, supplied explicitly by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    /// Owner's user id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Organizational department
    pub department: String,
}

/// Payload for creating a risk treatment
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentPayload {
    /// The risk being treated
    pub risk_id: Uuid,
    /// Treatment name
    pub name: String,
    /// Treatment description
    pub description: String,
    /// Treatment type: accept | mitigate | transfer | avoid
    pub treatment_type: String,
    /// When the treatment is due
    pub due_date: DateTime<Utc>,
    /// Optional assignee id
    #[serde(default)]
    pub assignee: Option<Uuid>,
}

fn default_active() -> bool {
    true
}
