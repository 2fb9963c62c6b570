//! Scoring engine: rounding, clamping, level matching and aggregation.
//!
//! Every number that ends up in a [`GradeResult`](crate::model::GradeResult)
//! passes through this module, so results are reproducible regardless of
//! which checker produced the raw value.

mod stats;

pub use stats::{calculate_batch_stats, BatchStats};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::CriterionEvalResult;
use crate::rubric::{sorted_levels, Criterion, RubricLevel};

/// Tolerance applied when matching a score against level points.
pub const LEVEL_TOLERANCE: f64 = 0.001;

/// Share of the maximum a criterion needs to count as passed.
pub const PASS_RATIO: f64 = 0.5;

/// How per-criterion points are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingPolicy {
    /// Points pass through unchanged
    #[serde(rename = "none")]
    None,
    /// Nearest quarter point, ties away from zero
    #[default]
    #[serde(rename = "half_up_0.25")]
    HalfUpQuarter,
}

impl RoundingPolicy {
    /// Rubric spelling of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingPolicy::None => "none",
            RoundingPolicy::HalfUpQuarter => "half_up_0.25",
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RoundingPolicy::None),
            "half_up_0.25" | "quarter" => Ok(RoundingPolicy::HalfUpQuarter),
            other => Err(Error::RubricMisconfigured(format!(
                "unknown rounding policy: {}",
                other
            ))),
        }
    }
}

/// Round a point value under the given policy.
pub fn round_points(points: f64, policy: RoundingPolicy) -> f64 {
    match policy {
        RoundingPolicy::None => points,
        // f64::round breaks ties away from zero
        RoundingPolicy::HalfUpQuarter => (points * 4.0).round() / 4.0,
    }
}

/// Clamp raw points to `[0, max]` and round them.
///
/// The result never leaves `[0, max]`: rounding up past a maximum that is
/// not a quarter multiple is capped at the largest quarter below it.
/// Non-finite input scores 0.
pub fn score_criterion(achieved: f64, max_points: f64, policy: RoundingPolicy) -> f64 {
    if !achieved.is_finite() || !max_points.is_finite() || max_points <= 0.0 {
        return 0.0;
    }

    let clamped = achieved.clamp(0.0, max_points);
    let rounded = round_points(clamped, policy);
    match policy {
        RoundingPolicy::None => rounded,
        RoundingPolicy::HalfUpQuarter => rounded.min((max_points * 4.0).floor() / 4.0).max(0.0),
    }
}

/// Match a score against rubric levels.
///
/// Levels are compared by descending points; the first level whose points
/// do not exceed the score (within [`LEVEL_TOLERANCE`]) wins. When none
/// matches, the lowest level is returned.
pub fn match_level(score: f64, levels: &[RubricLevel]) -> Option<&RubricLevel> {
    let sorted = sorted_levels(levels);
    sorted
        .iter()
        .find(|level| level.points <= score + LEVEL_TOLERANCE)
        .or_else(|| sorted.last())
        .copied()
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `total` over `max`, rounded to two decimals; 0 when
/// `max <= 0`.
pub fn calculate_percentage(total: f64, max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() || !total.is_finite() {
        return 0.0;
    }
    round2(total / max * 100.0)
}

/// Total of already-rounded criterion points, rounded again.
pub fn aggregate<I>(points: I, policy: RoundingPolicy) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round_points(points.into_iter().sum(), policy)
}

/// Turn a checker's raw result into a scored one.
///
/// Points are clamped and rounded, the level is matched on the rounded
/// value, and `passed` is recomputed from the final points.
pub fn finalize(raw: CriterionEvalResult, criterion: &Criterion, policy: RoundingPolicy) -> CriterionEvalResult {
    let points = score_criterion(raw.points, criterion.max_points, policy);
    CriterionEvalResult {
        passed: criterion.max_points > 0.0 && points >= criterion.max_points * PASS_RATIO,
        points,
        level: match_level(points, &criterion.levels).map(|l| l.code.clone()),
        reason: raw.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(code: &str, points: f64) -> RubricLevel {
        RubricLevel {
            code: code.into(),
            name: code.into(),
            points,
            description: String::new(),
        }
    }

    #[test]
    fn test_quarter_rounding_properties() {
        let mut x = -7.0;
        while x <= 7.0 {
            let r = round_points(x, RoundingPolicy::HalfUpQuarter);
            assert_eq!((r * 4.0).fract(), 0.0, "{} -> {}", x, r);
            assert!((r - x).abs() <= 0.125 + 1e-9, "{} -> {}", x, r);
            x += 0.013;
        }
    }

    #[test]
    fn test_quarter_ties_away_from_zero() {
        assert_eq!(round_points(0.125, RoundingPolicy::HalfUpQuarter), 0.25);
        assert_eq!(round_points(0.375, RoundingPolicy::HalfUpQuarter), 0.5);
        assert_eq!(round_points(-0.125, RoundingPolicy::HalfUpQuarter), -0.25);
        assert_eq!(round_points(1.1, RoundingPolicy::HalfUpQuarter), 1.0);
    }

    #[test]
    fn test_none_is_identity() {
        for x in [0.0, 0.1234, -3.3, 17.77] {
            assert_eq!(round_points(x, RoundingPolicy::None), x);
        }
    }

    #[test]
    fn test_score_criterion_bounds() {
        for policy in [RoundingPolicy::None, RoundingPolicy::HalfUpQuarter] {
            for max in [0.3, 1.0, 2.5, 10.0] {
                for achieved in [-5.0, 0.0, 0.29, 1.3, 2.49, 100.0, f64::NAN, f64::INFINITY] {
                    let s = score_criterion(achieved, max, policy);
                    assert!((0.0..=max).contains(&s), "{} of {} -> {}", achieved, max, s);
                }
            }
        }
        assert_eq!(score_criterion(0.29, 0.3, RoundingPolicy::HalfUpQuarter), 0.25);
        assert_eq!(score_criterion(1.0, 0.0, RoundingPolicy::HalfUpQuarter), 0.0);
    }

    #[test]
    fn test_match_level() {
        let levels = vec![level("B", 1.0), level("A", 2.0), level("C", 0.0)];
        assert_eq!(match_level(2.0, &levels).unwrap().code, "A");
        assert_eq!(match_level(1.9995, &levels).unwrap().code, "A");
        assert_eq!(match_level(1.5, &levels).unwrap().code, "B");
        assert_eq!(match_level(0.0, &levels).unwrap().code, "C");

        let high = vec![level("top", 5.0), level("mid", 3.0)];
        assert_eq!(match_level(1.0, &high).unwrap().code, "mid");
        assert!(match_level(1.0, &[]).is_none());

        // equal points keep rubric order, as Criterion::sorted_levels does
        let tied = vec![level("X", 1.0), level("Y", 1.0)];
        assert_eq!(match_level(1.0, &tied).unwrap().code, "X");
        assert_eq!(crate::rubric::sorted_levels(&tied)[0].code, "X");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(calculate_percentage(5.0, 0.0), 0.0);
        assert_eq!(calculate_percentage(5.0, -3.0), 0.0);
        assert_eq!(calculate_percentage(2.0, 3.0), 66.67);
        assert_eq!(calculate_percentage(3.0, 3.0), 100.0);
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(aggregate([0.25, 0.5, 1.0], RoundingPolicy::HalfUpQuarter), 1.75);
        assert_eq!(aggregate(Vec::<f64>::new(), RoundingPolicy::None), 0.0);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("none".parse::<RoundingPolicy>().unwrap(), RoundingPolicy::None);
        assert_eq!(
            "half_up_0.25".parse::<RoundingPolicy>().unwrap(),
            RoundingPolicy::HalfUpQuarter
        );
        assert!("banker".parse::<RoundingPolicy>().is_err());
        assert_eq!(
            serde_json::to_string(&RoundingPolicy::HalfUpQuarter).unwrap(),
            "\"half_up_0.25\""
        );
    }

    #[test]
    fn test_finalize_recomputes_pass() {
        let criterion = Criterion {
            id: "links".into(),
            name: "Hyperlinks".into(),
            detector_key: "hyperlinks".into(),
            max_points: 1.0,
            levels: vec![level("full", 1.0), level("half", 0.5), level("none", 0.0)],
        };
        let raw = CriterionEvalResult {
            passed: false,
            points: 0.49,
            level: None,
            reason: "x".into(),
        };
        let scored = finalize(raw, &criterion, RoundingPolicy::HalfUpQuarter);
        assert_eq!(scored.points, 0.5);
        assert!(scored.passed);
        assert_eq!(scored.level.as_deref(), Some("half"));
    }
}
