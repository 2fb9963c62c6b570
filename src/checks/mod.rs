//! Criterion checkers.
//!
//! A checker is a pure function from a [`DocumentFeatures`] and the rubric
//! [`Criterion`] it is evaluating to a raw [`CriterionEvalResult`]. Checkers
//! report points as a fraction of the criterion maximum; the
//! [`CheckerRegistry`] then hands every raw result to the scoring engine,
//! which clamps, rounds, matches the level and decides `passed`.
//!
//! # Example
//!
//! ```no_run
//! use docgrade::checks::CheckerRegistry;
//! use docgrade::extract::{extract_features, ExtractOptions};
//! use docgrade::rubric::Rubric;
//!
//! fn main() -> docgrade::Result<()> {
//!     let data = std::fs::read("deck.pptx")?;
//!     let features = extract_features(&data, "deck.pptx", &ExtractOptions::default())?;
//!     let rubric = Rubric::builtin(features.file_type)?;
//!     let results = CheckerRegistry::with_defaults().evaluate_rubric(&features, &rubric, rubric.rounding);
//!     for (id, result) in &results {
//!         println!("{}: {} ({})", id, result.points, result.reason);
//!     }
//!     Ok(())
//! }
//! ```

mod filename;
mod presentation;
mod word;

pub use filename::{check_filename, diagnose_filename, strip_diacritics, FILENAME_PATTERN};
pub use presentation::{
    check_animations, check_creativity, check_hyperlinks, check_outline, check_slide_master,
    check_theme, check_transitions, layout_balance, COLOR_COUNT_BEST, COLOR_COUNT_FAIR,
    HEADER_FOOTER_MIN_SLIDES, MAX_KIND_DIVERSITY, MAX_OBJECTS_PER_SLIDE, MIN_DISTINCT_LAYOUTS,
};
pub use word::{
    check_columns, check_drop_cap, check_equations, check_pictures, check_structure,
    check_styles, check_tab_stops, check_toc, MIN_TOC_ENTRIES,
};

use std::collections::{BTreeMap, HashMap};

use crate::model::{CriterionEvalResult, DocumentFeatures, FeatureSet, PresentationFeatures, WordFeatures};
use crate::rubric::{Criterion, Rubric};
use crate::scoring::{self, RoundingPolicy};

/// Signature of a criterion checker.
pub type CheckFn = fn(&DocumentFeatures, &Criterion) -> CriterionEvalResult;

/// Checkers keyed by detector key.
#[derive(Clone)]
pub struct CheckerRegistry {
    checkers: HashMap<String, CheckFn>,
}

impl CheckerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in checker.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("filename", check_filename);
        registry.register("header_footer", check_header_footer);
        registry.register("hyperlinks", check_hyperlinks);
        registry.register("creativity", check_creativity);
        registry.register("theme", check_theme);
        registry.register("slide_master", check_slide_master);
        registry.register("transitions", check_transitions);
        registry.register("animations", check_animations);
        registry.register("outline", check_outline);
        registry.register("smartart", check_smart_art);
        registry.register("objects", check_objects);
        registry.register("wordart", check_word_art);
        registry.register("structure", check_structure);
        registry.register("toc", check_toc);
        registry.register("columns", check_columns);
        registry.register("drop_cap", check_drop_cap);
        registry.register("pictures", check_pictures);
        registry.register("equations", check_equations);
        registry.register("tab_stops", check_tab_stops);
        registry.register("styles", check_styles);
        registry
    }

    /// Register a checker, replacing any previous one for the key.
    pub fn register(&mut self, key: impl Into<String>, check: CheckFn) {
        self.checkers.insert(key.into(), check);
    }

    /// Get the checker for a detector key.
    pub fn get(&self, key: &str) -> Option<CheckFn> {
        self.checkers.get(key).copied()
    }

    /// Check if a detector key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.checkers.contains_key(key)
    }

    /// Registered detector keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Evaluate one criterion and score the result.
    ///
    /// An unknown detector key yields a zero-score result naming the key.
    pub fn evaluate(
        &self,
        features: &DocumentFeatures,
        criterion: &Criterion,
        policy: RoundingPolicy,
    ) -> CriterionEvalResult {
        let raw = match self.get(&criterion.detector_key) {
            Some(check) => check(features, criterion),
            None => {
                log::warn!(
                    "Criterion {} uses unknown detector key '{}'",
                    criterion.id,
                    criterion.detector_key
                );
                CriterionEvalResult::zero(format!(
                    "unknown detector key: {}",
                    criterion.detector_key
                ))
            }
        };
        scoring::finalize(raw, criterion, policy)
    }

    /// Evaluate the criterion that uses `detector_key` in `rubric`.
    ///
    /// When the rubric has no rule for the key, the result is a zero score
    /// reporting that the criterion is not configured.
    pub fn evaluate_key(
        &self,
        features: &DocumentFeatures,
        rubric: &Rubric,
        detector_key: &str,
    ) -> CriterionEvalResult {
        match rubric.criterion_for(detector_key) {
            Some(criterion) => self.evaluate(features, criterion, rubric.rounding),
            None => CriterionEvalResult::not_configured(detector_key),
        }
    }

    /// Evaluate every criterion of a rubric, keyed by criterion id.
    pub fn evaluate_rubric(
        &self,
        features: &DocumentFeatures,
        rubric: &Rubric,
        policy: RoundingPolicy,
    ) -> BTreeMap<String, CriterionEvalResult> {
        rubric
            .criteria
            .iter()
            .map(|criterion| {
                let result = self.evaluate(features, criterion, policy);
                log::debug!(
                    "{} [{}]: {} / {} ({})",
                    criterion.id,
                    criterion.detector_key,
                    result.points,
                    criterion.max_points,
                    result.reason
                );
                (criterion.id.clone(), result)
            })
            .collect()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Raw result awarding `fraction` of the criterion maximum.
pub(crate) fn award(criterion: &Criterion, fraction: f64, reason: impl Into<String>) -> CriterionEvalResult {
    let points = criterion.max_points * fraction;
    CriterionEvalResult {
        passed: fraction >= scoring::PASS_RATIO,
        points,
        level: None,
        reason: reason.into(),
    }
}

/// Presentation features, or a zero-score result for other kinds.
pub(crate) fn require_presentation<'a>(
    features: &'a DocumentFeatures,
    criterion: &Criterion,
) -> std::result::Result<&'a PresentationFeatures, CriterionEvalResult> {
    features.as_presentation().ok_or_else(|| {
        CriterionEvalResult::zero(format!(
            "{} applies to presentations only, got {}",
            criterion.detector_key, features.file_type
        ))
    })
}

/// Word features, or a zero-score result for other kinds.
pub(crate) fn require_word<'a>(
    features: &'a DocumentFeatures,
    criterion: &Criterion,
) -> std::result::Result<&'a WordFeatures, CriterionEvalResult> {
    features.as_word().ok_or_else(|| {
        CriterionEvalResult::zero(format!(
            "{} applies to word documents only, got {}",
            criterion.detector_key, features.file_type
        ))
    })
}

/// Header/footer usage for either document kind.
pub fn check_header_footer(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match &features.content {
        FeatureSet::Presentation(p) => presentation::header_footer(p, criterion),
        FeatureSet::WordProcessing(w) => word::header_footer(w, criterion),
    }
}

/// Table and chart usage for either document kind.
pub fn check_objects(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match &features.content {
        FeatureSet::Presentation(p) => presentation::objects(p, criterion),
        FeatureSet::WordProcessing(w) => word::objects(w, criterion),
    }
}

/// SmartArt usage for either document kind.
pub fn check_smart_art(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match &features.content {
        FeatureSet::Presentation(p) => presentation::smart_art(p, criterion),
        FeatureSet::WordProcessing(w) => word::smart_art(w, criterion),
    }
}

/// WordArt usage for either document kind.
pub fn check_word_art(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match &features.content {
        FeatureSet::Presentation(p) => presentation::word_art(p, criterion),
        FeatureSet::WordProcessing(w) => word::word_art(w, criterion),
    }
}

/// Criterion fixture shared by checker tests.
#[cfg(test)]
pub(crate) fn test_criterion(key: &str, max_points: f64) -> Criterion {
    use crate::rubric::RubricLevel;

    let level = |code: &str, points: f64| RubricLevel {
        code: code.into(),
        name: code.into(),
        points,
        description: String::new(),
    };
    Criterion {
        id: key.into(),
        name: key.into(),
        detector_key: key.into(),
        max_points,
        levels: vec![
            level("A", max_points),
            level("B", max_points * 0.75),
            level("C", max_points * 0.5),
            level("D", max_points * 0.25),
            level("E", 0.0),
        ],
    }
}
