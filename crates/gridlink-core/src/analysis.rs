//! Owned data model for security-analysis results.
//!
//! The external engine reports one record per simulated scenario: the
//! pre-contingency (base case) run plus one record per contingency. Records
//! are marshaled into [`AnalysisResult`] at the engine boundary; the
//! "empty contingency id means base case" wire convention is resolved there
//! into `Option<String>`, so downstream code matches on the tag instead of
//! re-checking string emptiness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single load-flow computation inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Converged,
    MaxIterationReached,
    SolverFailed,
    Failed,
    NoCalculation,
}

impl AnalysisStatus {
    /// Wire-format name, as rendered in summary tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Converged => "CONVERGED",
            AnalysisStatus::MaxIterationReached => "MAX_ITERATION_REACHED",
            AnalysisStatus::SolverFailed => "SOLVER_FAILED",
            AnalysisStatus::Failed => "FAILED",
            AnalysisStatus::NoCalculation => "NO_CALCULATION",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of operating limit breached by a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitType {
    Current,
    LowVoltage,
    HighVoltage,
    ActivePower,
    ApparentPower,
    Other,
}

impl LimitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitType::Current => "CURRENT",
            LimitType::LowVoltage => "LOW_VOLTAGE",
            LimitType::HighVoltage => "HIGH_VOLTAGE",
            LimitType::ActivePower => "ACTIVE_POWER",
            LimitType::ApparentPower => "APPARENT_POWER",
            LimitType::Other => "OTHER",
        }
    }
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which terminal of a branch a violation was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchSide {
    None,
    One,
    Two,
}

impl BranchSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchSide::None => "NONE",
            BranchSide::One => "ONE",
            BranchSide::Two => "TWO",
        }
    }
}

impl fmt::Display for BranchSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported breach of an operating limit in a simulation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitViolation {
    /// Identifier of the equipment carrying the violation
    pub subject_id: String,
    /// Human-readable equipment name (may be empty)
    pub subject_name: String,
    pub limit_type: LimitType,
    /// The limit that was breached
    pub limit: f64,
    /// Named limit (e.g. permanent vs. a temporary limit), may be empty
    pub limit_name: String,
    /// Duration (seconds) the breach is acceptable for
    pub acceptable_duration: i32,
    /// Reduction factor applied to the limit before comparison
    pub limit_reduction: f64,
    /// The observed value
    pub value: f64,
    /// Which branch terminal the violation sits on
    pub side: BranchSide,
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LimitViolation(subject_id={:?}, subject_name={:?}, limit_type={}, limit={}, \
             limit_name={:?}, acceptable_duration={}, limit_reduction={}, value={}, side={})",
            self.subject_id,
            self.subject_name,
            self.limit_type,
            self.limit,
            self.limit_name,
            self.acceptable_duration,
            self.limit_reduction,
            self.value,
            self.side,
        )
    }
}

/// Result of one simulated scenario.
///
/// `contingency_id` is `None` for the pre-contingency (base case) run and
/// `Some(id)` for a post-contingency run. Among one engine run's results at
/// most one record is the base case and every `Some` id is unique; both are
/// engine-side guarantees, not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub contingency_id: Option<String>,
    pub status: AnalysisStatus,
    /// Violations in engine report order
    pub limit_violations: Vec<LimitViolation>,
}

impl AnalysisResult {
    /// Base-case result (no contingency applied).
    pub fn base_case(status: AnalysisStatus, limit_violations: Vec<LimitViolation>) -> Self {
        Self {
            contingency_id: None,
            status,
            limit_violations,
        }
    }

    /// Post-contingency result for the given contingency id.
    pub fn post_contingency(
        contingency_id: impl Into<String>,
        status: AnalysisStatus,
        limit_violations: Vec<LimitViolation>,
    ) -> Self {
        Self {
            contingency_id: Some(contingency_id.into()),
            status,
            limit_violations,
        }
    }

    /// Whether this record is the pre-contingency run.
    pub fn is_base_case(&self) -> bool {
        self.contingency_id.is_none()
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisResult(contingency_id={:?}, status={}, limit_violations=[{}])",
            self.contingency_id.as_deref().unwrap_or(""),
            self.status,
            self.limit_violations.len(),
        )
    }
}

/// A simulated scenario: one or more network elements out of service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contingency {
    pub id: String,
    /// Elements removed simultaneously; never empty
    element_ids: Vec<String>,
}

impl Contingency {
    /// Contingency removing a single element, named after it by default.
    pub fn single(element_id: impl Into<String>, id: Option<String>) -> Self {
        let element_id = element_id.into();
        Self {
            id: id.unwrap_or_else(|| element_id.clone()),
            element_ids: vec![element_id],
        }
    }

    /// Contingency removing several elements at once.
    ///
    /// Fails when `element_ids` is empty: a contingency with nothing to
    /// remove is not a scenario.
    pub fn multiple(
        id: impl Into<String>,
        element_ids: Vec<String>,
    ) -> crate::GridResult<Self> {
        if element_ids.is_empty() {
            return Err(crate::GridError::Other(
                "contingency requires at least one element id".into(),
            ));
        }
        Ok(Self {
            id: id.into(),
            element_ids,
        })
    }

    pub fn element_ids(&self) -> &[String] {
        &self.element_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation() -> LimitViolation {
        LimitViolation {
            subject_id: "NHV1_NHV2_1".into(),
            subject_name: "".into(),
            limit_type: LimitType::Current,
            limit: 500.0,
            limit_name: "permanent".into(),
            acceptable_duration: 2147483647,
            limit_reduction: 1.0,
            value: 1008.9,
            side: BranchSide::One,
        }
    }

    #[test]
    fn test_result_display_counts_violations() {
        let result =
            AnalysisResult::post_contingency("First contingency", AnalysisStatus::Converged, vec![violation()]);
        let repr = result.to_string();
        assert!(repr.contains("\"First contingency\""));
        assert!(repr.contains("status=CONVERGED"));
        assert!(repr.contains("limit_violations=[1]"));
    }

    #[test]
    fn test_base_case_has_no_id() {
        let result = AnalysisResult::base_case(AnalysisStatus::Converged, vec![]);
        assert!(result.is_base_case());
        assert!(result.to_string().contains("contingency_id=\"\""));
    }

    #[test]
    fn test_single_contingency_defaults_id_to_element() {
        let c = Contingency::single("GEN", None);
        assert_eq!(c.id, "GEN");
        assert_eq!(c.element_ids(), ["GEN"]);

        let named = Contingency::single("GEN", Some("loss-of-gen".into()));
        assert_eq!(named.id, "loss-of-gen");
        assert_eq!(named.element_ids(), ["GEN"]);
    }

    #[test]
    fn test_multiple_contingency_rejects_empty_elements() {
        assert!(Contingency::multiple("both-lines", vec![]).is_err());
        let c = Contingency::multiple("both-lines", vec!["L1".into(), "L2".into()]).unwrap();
        assert_eq!(c.element_ids().len(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let result =
            AnalysisResult::post_contingency("c1", AnalysisStatus::SolverFailed, vec![violation()]);
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
