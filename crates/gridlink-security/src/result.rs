//! Aggregation of raw engine results into a structured view.
//!
//! The engine reports one flat, ordered record sequence per run: the base
//! case (no contingency id) plus one record per contingency. The aggregator
//! partitions that sequence once at construction: the base case is stored
//! on its own, every other record goes into an insertion-ordered collection
//! keyed by contingency id.

use gridlink_core::{AnalysisResult, GridError, GridResult};
use std::collections::HashMap;
use std::io::Write;
use tabwriter::TabWriter;

const TABLE_HEADER: [&str; 11] = [
    "Contingency ID",
    "Status",
    "Equipment ID",
    "Equipment name",
    "Limit type",
    "Limit",
    "Limit name",
    "Acceptable duration",
    "Limit reduction",
    "Value",
    "Side",
];

/// Structured view over one security-analysis run.
///
/// Post-contingency results keep the relative order the engine reported
/// them in. A duplicate contingency id overwrites the earlier record in
/// place; a duplicate base case overwrites the stored one. Neither is
/// expected from a well-behaved engine.
#[derive(Debug, Clone)]
pub struct SecurityAnalysisResult {
    pre_contingency: Option<AnalysisResult>,
    post_contingency: Vec<AnalysisResult>,
    // contingency id -> position in post_contingency
    positions: HashMap<String, usize>,
}

impl SecurityAnalysisResult {
    /// Partition a raw result sequence in a single pass.
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        let mut pre_contingency = None;
        let mut post_contingency: Vec<AnalysisResult> = Vec::new();
        let mut positions = HashMap::new();
        for result in results {
            match result.contingency_id.clone() {
                None => pre_contingency = Some(result),
                Some(id) => match positions.get(&id) {
                    Some(&position) => post_contingency[position] = result,
                    None => {
                        positions.insert(id, post_contingency.len());
                        post_contingency.push(result);
                    }
                },
            }
        }
        Self {
            pre_contingency,
            post_contingency,
            positions,
        }
    }

    /// The base-case result. Fails with [`GridError::MissingBaseCase`] when
    /// the engine run did not include one; no default is fabricated.
    pub fn pre_contingency_result(&self) -> GridResult<&AnalysisResult> {
        self.pre_contingency
            .as_ref()
            .ok_or(GridError::MissingBaseCase)
    }

    /// Post-contingency results, in the order the engine reported them.
    pub fn post_contingency_results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.post_contingency.iter()
    }

    /// Exact lookup by contingency id; not-found names the missing id.
    pub fn find_post_contingency_result(
        &self,
        contingency_id: &str,
    ) -> GridResult<&AnalysisResult> {
        self.positions
            .get(contingency_id)
            .map(|&position| &self.post_contingency[position])
            .ok_or_else(|| GridError::not_found("contingency", contingency_id))
    }

    /// Flattened tabular summary of every post-contingency result.
    ///
    /// One header row per contingency (id and status, remaining cells
    /// blank), then one row per limit violation under it (id and status
    /// blank, then the violation fields; `Limit` and `Value` formatted to
    /// one decimal place). Pure rendering: two calls on unchanged state
    /// yield identical output.
    pub fn table(&self) -> GridResult<String> {
        let mut writer = TabWriter::new(Vec::new());
        writeln!(writer, "{}", TABLE_HEADER.join("\t"))?;
        for result in &self.post_contingency {
            let id = result.contingency_id.as_deref().unwrap_or("");
            writeln!(writer, "{}\t{}\t\t\t\t\t\t\t\t\t", id, result.status)?;
            for violation in &result.limit_violations {
                writeln!(
                    writer,
                    "\t\t{}\t{}\t{}\t{:.1}\t{}\t{}\t{}\t{:.1}\t{}",
                    violation.subject_id,
                    violation.subject_name,
                    violation.limit_type,
                    violation.limit,
                    violation.limit_name,
                    violation.acceptable_duration,
                    violation.limit_reduction,
                    violation.value,
                    violation.side,
                )?;
            }
        }
        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|_| GridError::Other("table rendering failed".into()))?;
        String::from_utf8(bytes).map_err(|e| GridError::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlink_core::{AnalysisStatus, BranchSide, LimitType, LimitViolation};

    fn violation(subject_id: &str, limit: f64, value: f64) -> LimitViolation {
        LimitViolation {
            subject_id: subject_id.into(),
            subject_name: format!("{subject_id} name"),
            limit_type: LimitType::Current,
            limit,
            limit_name: "permanent".into(),
            acceptable_duration: 600,
            limit_reduction: 1.0,
            value,
            side: BranchSide::One,
        }
    }

    fn sample() -> SecurityAnalysisResult {
        SecurityAnalysisResult::new(vec![
            AnalysisResult::base_case(AnalysisStatus::Converged, vec![]),
            AnalysisResult::post_contingency(
                "c1",
                AnalysisStatus::Converged,
                vec![violation("NHV1_NHV2_1", 250.0, 123.456)],
            ),
            AnalysisResult::post_contingency("c2", AnalysisStatus::SolverFailed, vec![]),
        ])
    }

    #[test]
    fn test_base_case_partitioned_out() {
        let result = sample();
        assert!(result.pre_contingency_result().unwrap().is_base_case());
        assert_eq!(result.post_contingency_results().count(), 2);
    }

    #[test]
    fn test_missing_base_case_is_an_error() {
        let result = SecurityAnalysisResult::new(vec![AnalysisResult::post_contingency(
            "c1",
            AnalysisStatus::Converged,
            vec![],
        )]);
        assert!(matches!(
            result.pre_contingency_result(),
            Err(GridError::MissingBaseCase)
        ));
    }

    #[test]
    fn test_lookup_by_id() {
        let result = sample();
        let c2 = result.find_post_contingency_result("c2").unwrap();
        assert_eq!(c2.status, AnalysisStatus::SolverFailed);

        let err = result.find_post_contingency_result("c3").unwrap_err();
        assert_eq!(err.to_string(), "contingency 'c3' not found");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let result = sample();
        let ids: Vec<_> = result
            .post_contingency_results()
            .map(|r| r.contingency_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, ["c1", "c2"]);
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let result = SecurityAnalysisResult::new(vec![
            AnalysisResult::post_contingency("c1", AnalysisStatus::Converged, vec![]),
            AnalysisResult::post_contingency("c2", AnalysisStatus::Converged, vec![]),
            AnalysisResult::post_contingency("c1", AnalysisStatus::Failed, vec![]),
        ]);
        let ids: Vec<_> = result
            .post_contingency_results()
            .map(|r| r.contingency_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, ["c1", "c2"]);
        assert_eq!(
            result.find_post_contingency_result("c1").unwrap().status,
            AnalysisStatus::Failed
        );
    }

    #[test]
    fn test_duplicate_base_case_last_write_wins() {
        let result = SecurityAnalysisResult::new(vec![
            AnalysisResult::base_case(AnalysisStatus::Converged, vec![]),
            AnalysisResult::base_case(AnalysisStatus::Failed, vec![]),
        ]);
        assert_eq!(
            result.pre_contingency_result().unwrap().status,
            AnalysisStatus::Failed
        );
    }

    #[test]
    fn test_table_formats_numbers_to_one_decimal() {
        let table = sample().table().unwrap();
        assert!(table.contains("250.0"));
        assert!(table.contains("123.5"));
        assert!(table.contains("CONVERGED"));
        assert!(table.contains("Contingency ID"));
    }

    #[test]
    fn test_table_rendering_is_idempotent() {
        let result = sample();
        assert_eq!(result.table().unwrap(), result.table().unwrap());
    }
}
