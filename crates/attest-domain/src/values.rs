//! Value objects - self-validating scalar wrappers
//!
//! Strings are validated once at construction; an instance existing at all
//! means its invariants hold. Scored attributes ([`Impact`],
//! [`Likelihood`]) are closed five-point ordinal scales.

use crate::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Maximum length of a framework name in characters.
pub const MAX_FRAMEWORK_NAME_LEN: usize = 100;

/// Name of a compliance framework (e.g. "SOC 2", "ISO 27001")
///
/// Non-empty after trimming and at most 100 characters. Holds the original
/// string, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FrameworkName(String);

impl FrameworkName {
    /// Create a framework name, validating length and non-emptiness.
    ///
    /// # Errors
    /// Returns a validation failure if the trimmed value is empty or the
    /// value exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("Framework name cannot be empty"));
        }
        if value.chars().count() > MAX_FRAMEWORK_NAME_LEN {
            return Err(DomainError::validation(
                "Framework name cannot exceed 100 characters",
            ));
        }
        Ok(Self(value))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FrameworkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version label of a compliance framework (e.g. "2022", "v3.2.1")
///
/// Non-empty; the format is otherwise unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FrameworkVersion(String);

impl FrameworkVersion {
    /// Create a framework version.
    ///
    /// # Errors
    /// Returns a validation failure if the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation(
                "Framework version cannot be empty",
            ));
        }
        Ok(Self(value))
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Impact of a risk, five-point ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Negligible consequences (ordinal 1)
    Insignificant,
    /// Minor consequences (ordinal 2)
    Minor,
    /// Moderate consequences (ordinal 3)
    Moderate,
    /// Major consequences (ordinal 4)
    Major,
    /// Severe consequences (ordinal 5)
    Severe,
}

impl Impact {
    /// Ordinal weight used by the scoring engine (1-5).
    pub fn ordinal(&self) -> u8 {
        match self {
            Impact::Insignificant => 1,
            Impact::Minor => 2,
            Impact::Moderate => 3,
            Impact::Major => 4,
            Impact::Severe => 5,
        }
    }

    /// Get the impact name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Insignificant => "insignificant",
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Major => "major",
            Impact::Severe => "severe",
        }
    }

    /// Parse an impact from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "insignificant" => Some(Impact::Insignificant),
            "minor" => Some(Impact::Minor),
            "moderate" => Some(Impact::Moderate),
            "major" => Some(Impact::Major),
            "severe" => Some(Impact::Severe),
            _ => None,
        }
    }

    /// All impacts in ascending ordinal order.
    pub const ALL: [Impact; 5] = [
        Impact::Insignificant,
        Impact::Minor,
        Impact::Moderate,
        Impact::Major,
        Impact::Severe,
    ];
}

impl std::str::FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid impact: {}", s))
    }
}

/// Likelihood of a risk, five-point ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    /// May occur only in exceptional circumstances (ordinal 1)
    Rare,
    /// Could occur at some time (ordinal 2)
    Unlikely,
    /// Might occur at some time (ordinal 3)
    Possible,
    /// Will probably occur (ordinal 4)
    Likely,
    /// Expected to occur (ordinal 5)
    AlmostCertain,
}

impl Likelihood {
    /// Ordinal weight used by the scoring engine (1-5).
    pub fn ordinal(&self) -> u8 {
        match self {
            Likelihood::Rare => 1,
            Likelihood::Unlikely => 2,
            Likelihood::Possible => 3,
            Likelihood::Likely => 4,
            Likelihood::AlmostCertain => 5,
        }
    }

    /// Get the likelihood name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Rare => "rare",
            Likelihood::Unlikely => "unlikely",
            Likelihood::Possible => "possible",
            Likelihood::Likely => "likely",
            Likelihood::AlmostCertain => "almost_certain",
        }
    }

    /// Parse a likelihood from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rare" => Some(Likelihood::Rare),
            "unlikely" => Some(Likelihood::Unlikely),
            "possible" => Some(Likelihood::Possible),
            "likely" => Some(Likelihood::Likely),
            "almost_certain" => Some(Likelihood::AlmostCertain),
            _ => None,
        }
    }

    /// All likelihoods in ascending ordinal order.
    pub const ALL: [Likelihood; 5] = [
        Likelihood::Rare,
        Likelihood::Unlikely,
        Likelihood::Possible,
        Likelihood::Likely,
        Likelihood::AlmostCertain,
    ];
}

impl std::str::FromStr for Likelihood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid likelihood: {}", s))
    }
}
