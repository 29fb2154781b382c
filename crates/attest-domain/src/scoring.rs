//! Risk scoring engine
//!
//! Pure functions mapping (impact, likelihood) pairs to a numeric score
//! and severity band, plus review-due computation. The engine has no
//! notion of inherent versus residual - callers pick the pair.

use crate::{Impact, Likelihood};
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Default horizon for "review upcoming" checks, in days.
pub const DEFAULT_REVIEW_HORIZON_DAYS: u32 = 30;

/// Compute the numeric risk score: ordinal(impact) x ordinal(likelihood).
///
/// Range is 1-25. Monotonic in both arguments: raising either ordinal
/// never lowers the score.
pub fn score(impact: Impact, likelihood: Likelihood) -> u8 {
    impact.ordinal() * likelihood.ordinal()
}

/// Severity band derived from a numeric risk score
///
/// Fixed thresholds with inclusive lower bounds:
/// score >= 15 is Critical, >= 8 High, >= 4 Medium, below 4 Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Score 1-3
    Low,
    /// Score 4-7
    Medium,
    /// Score 8-14
    High,
    /// Score 15-25
    Critical,
}

impl Severity {
    /// Classify a numeric score into its severity band.
    pub fn from_score(score: u8) -> Self {
        if score >= 15 {
            Severity::Critical
        } else if score >= 8 {
            Severity::High
        } else if score >= 4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scored (impact, likelihood) pair: numeric value plus severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    /// Numeric score, 1-25
    pub value: u8,
    /// Severity band for the score
    pub severity: Severity,
}

impl RiskScore {
    /// Score an (impact, likelihood) pair.
    pub fn rate(impact: Impact, likelihood: Likelihood) -> Self {
        let value = score(impact, likelihood);
        Self {
            value,
            severity: Severity::from_score(value),
        }
    }
}

/// Whether a review is due: true iff a next review date exists and has
/// passed (inclusive of `now` itself).
pub fn is_review_due(next_review_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match next_review_date {
        Some(next) => next <= now,
        None => false,
    }
}

/// Whether a review falls inside the upcoming horizon:
/// true iff `now < next_review_date <= now + horizon_days`.
///
/// A horizon whose end falls outside the representable date range is
/// treated as unbounded.
pub fn is_review_upcoming(
    next_review_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    horizon_days: u32,
) -> bool {
    let Some(next) = next_review_date else {
        return false;
    };
    let horizon = chrono::Duration::days(i64::from(horizon_days));
    match now.checked_add_signed(horizon) {
        Some(end) => now < next && next <= end,
        None => now < next,
    }
}

/// Derive the next review date from the last review and the review
/// period, using calendar-month arithmetic.
///
/// Returns `None` when the result falls outside the representable date
/// range; the computation never panics.
pub fn next_review_date(last_review: DateTime<Utc>, period_months: u32) -> Option<DateTime<Utc>> {
    last_review.checked_add_months(Months::new(period_months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_score_extremes() {
        assert_eq!(score(Impact::Severe, Likelihood::AlmostCertain), 25);
        assert_eq!(score(Impact::Insignificant, Likelihood::Rare), 1);
    }

    #[test]
    fn test_score_midpoint() {
        assert_eq!(score(Impact::Moderate, Likelihood::Possible), 9);
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::from_score(1), Severity::Low);
        assert_eq!(Severity::from_score(3), Severity::Low);
        assert_eq!(Severity::from_score(4), Severity::Medium);
        assert_eq!(Severity::from_score(7), Severity::Medium);
        assert_eq!(Severity::from_score(8), Severity::High);
        assert_eq!(Severity::from_score(14), Severity::High);
        assert_eq!(Severity::from_score(15), Severity::Critical);
        assert_eq!(Severity::from_score(25), Severity::Critical);
    }

    #[test]
    fn test_rate_pairs() {
        let critical = RiskScore::rate(Impact::Severe, Likelihood::AlmostCertain);
        assert_eq!(critical.value, 25);
        assert_eq!(critical.severity, Severity::Critical);

        let low = RiskScore::rate(Impact::Insignificant, Likelihood::Rare);
        assert_eq!(low.value, 1);
        assert_eq!(low.severity, Severity::Low);

        let high = RiskScore::rate(Impact::Moderate, Likelihood::Possible);
        assert_eq!(high.value, 9);
        assert_eq!(high.severity, Severity::High);

        let residual = RiskScore::rate(Impact::Minor, Likelihood::Unlikely);
        assert_eq!(residual.value, 4);
        assert_eq!(residual.severity, Severity::Medium);
    }

    #[test]
    fn test_review_due() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let yesterday = now - chrono::Duration::days(1);
        let tomorrow = now + chrono::Duration::days(1);

        assert!(is_review_due(Some(yesterday), now));
        assert!(is_review_due(Some(now), now));
        assert!(!is_review_due(Some(tomorrow), now));
        assert!(!is_review_due(None, now));
    }

    #[test]
    fn test_review_upcoming() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let in_a_week = now + chrono::Duration::days(7);
        let in_two_months = now + chrono::Duration::days(60);
        let yesterday = now - chrono::Duration::days(1);

        assert!(is_review_upcoming(
            Some(in_a_week),
            now,
            DEFAULT_REVIEW_HORIZON_DAYS
        ));
        assert!(!is_review_upcoming(
            Some(in_two_months),
            now,
            DEFAULT_REVIEW_HORIZON_DAYS
        ));
        // Already due is not "upcoming"
        assert!(!is_review_upcoming(
            Some(yesterday),
            now,
            DEFAULT_REVIEW_HORIZON_DAYS
        ));
        assert!(!is_review_upcoming(None, now, DEFAULT_REVIEW_HORIZON_DAYS));
    }

    #[test]
    fn test_next_review_date_calendar_months() {
        let reviewed = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        // Chrono clamps to the end of the shorter month
        let next = next_review_date(reviewed, 1);
        assert_eq!(
            next,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap())
        );

        let annual = next_review_date(reviewed, 12);
        assert_eq!(
            annual,
            Some(Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_next_review_date_out_of_range() {
        let reviewed = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(next_review_date(reviewed, u32::MAX), None);
    }

    #[test]
    fn test_review_upcoming_extreme_horizon() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let next_year = now + chrono::Duration::days(365);

        assert!(is_review_upcoming(Some(next_year), now, u32::MAX));
        assert!(!is_review_upcoming(Some(next_year), now, 0));
    }
}
