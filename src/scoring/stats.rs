//! Batch statistics over graded results.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::model::GradeResult;

/// Summary of a batch of grade percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of graded results
    pub count: usize,
    /// Mean percentage, two decimals
    pub average: f64,
    /// Lowest percentage
    pub min: f64,
    /// Highest percentage
    pub max: f64,
    /// Results with `percentage >= threshold`
    pub pass_count: usize,
    /// Results below the threshold
    pub fail_count: usize,
}

/// Compute statistics over `results`; every field is 0 for an empty slice.
pub fn calculate_batch_stats(results: &[GradeResult], threshold: f64) -> BatchStats {
    if results.is_empty() {
        return BatchStats::default();
    }

    let percentages: Vec<f64> = results.iter().map(|r| r.percentage).collect();
    let sum: f64 = percentages.iter().sum();
    let pass_count = results.iter().filter(|r| r.is_pass(threshold)).count();

    BatchStats {
        count: results.len(),
        average: round2(sum / results.len() as f64),
        min: percentages.iter().copied().fold(f64::INFINITY, f64::min),
        max: percentages.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        pass_count,
        fail_count: results.len() - pass_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FileType;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn result(percentage: f64) -> GradeResult {
        GradeResult {
            file_id: "f".into(),
            filename: "f.pptx".into(),
            file_type: FileType::Pptx,
            rubric_name: "r".into(),
            total_points: percentage / 10.0,
            max_possible_points: 10.0,
            percentage,
            by_criteria: BTreeMap::new(),
            graded_at: Utc::now(),
            processing_time_ms: 0,
        }
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(calculate_batch_stats(&[], 50.0), BatchStats::default());
    }

    #[test]
    fn test_pass_fail_split() {
        let results = vec![result(50.0), result(49.99), result(80.0), result(10.0)];
        let stats = calculate_batch_stats(&results, 50.0);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.pass_count, 2);
        assert_eq!(stats.fail_count, 2);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 80.0);
        assert_eq!(stats.average, 47.5);
    }
}
