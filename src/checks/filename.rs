//! Submission file naming: `<12-digit id><sep><Name><sep><Topic>[.pptx|.docx]`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::award;
use crate::model::{CriterionEvalResult, DocumentFeatures};
use crate::rubric::Criterion;

/// Accepted file name shape.
pub const FILENAME_PATTERN: &str =
    r"^(\d{12})([-_])([A-Za-z]+)([-_])([A-Za-z0-9]+)(\.(?i:pptx|docx))?$";

/// Length of the student id prefix.
const ID_DIGITS: usize = 12;

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILENAME_PATTERN).expect("filename pattern is valid"))
}

/// Remove diacritics: NFD decomposition with combining marks dropped.
///
/// `đ`/`Đ` have no decomposition and are mapped to `d`/`D` explicitly.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}

/// Explain why a name does not match [`FILENAME_PATTERN`].
///
/// Returns `None` when the name is valid.
pub fn diagnose_filename(filename: &str) -> Option<String> {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    let name = strip_diacritics(base.trim());

    if filename_regex().is_match(&name) {
        return None;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name.as_str(), None),
    };
    if let Some(ext) = ext {
        if !matches!(ext.to_ascii_lowercase().as_str(), "pptx" | "docx") {
            return Some(format!("unexpected extension '.{}'", ext));
        }
    }

    let digits = stem.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return Some(format!("missing {}-digit student id prefix", ID_DIGITS));
    }
    if digits != ID_DIGITS {
        return Some(format!(
            "student id has {} digits, expected a {}-digit id",
            digits, ID_DIGITS
        ));
    }

    let rest = &stem[ID_DIGITS..];
    let Some(rest) = rest.strip_prefix(['-', '_']) else {
        return Some("missing '-' or '_' separator after the student id".to_string());
    };

    let name_len = rest.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if name_len == 0 {
        return Some("missing name after the student id".to_string());
    }
    let after_name = &rest[name_len..];
    let Some(topic) = after_name.strip_prefix(['-', '_']) else {
        return Some(if after_name.is_empty() {
            "missing separator and topic after the name".to_string()
        } else {
            "name must contain letters only, without spaces".to_string()
        });
    };

    if topic.is_empty() {
        return Some("missing topic after the name".to_string());
    }
    Some("topic must contain letters and digits only".to_string())
}

/// Check the submitted file name.
pub fn check_filename(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match diagnose_filename(&features.filename) {
        None => award(criterion, 1.0, format!("file name '{}' follows the convention", features.filename)),
        Some(problem) => award(
            criterion,
            0.0,
            format!("file name '{}' is invalid: {}", features.filename, problem),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_criterion;
    use crate::model::PresentationFeatures;

    fn check(name: &str) -> CriterionEvalResult {
        let features = DocumentFeatures::presentation(name, PresentationFeatures::default());
        check_filename(&features, &test_criterion("filename", 0.5))
    }

    #[test]
    fn test_valid_names() {
        assert!(diagnose_filename("054206000135-DoanDinhHoan-DEPPT01.pptx").is_none());
        assert!(diagnose_filename("054206000135_DoanDinhHoan_DEPPT01").is_none());
        assert!(diagnose_filename("054206000135-ĐoànĐìnhHoàn-DEPPT01.docx").is_none());
        assert!(diagnose_filename("uploads/054206000135-Hoan-T1.PPTX").is_none());

        let result = check("054206000135-DoanDinhHoan-DEPPT01.pptx");
        assert_eq!(result.points, 0.5);
        assert!(result.passed);
    }

    #[test]
    fn test_missing_id() {
        let result = check("bad_name.pptx");
        assert_eq!(result.points, 0.0);
        assert!(!result.passed);
        assert!(result.reason.contains("12-digit"), "{}", result.reason);
    }

    #[test]
    fn test_sub_pattern_diagnostics() {
        let short = diagnose_filename("0542060001-Hoan-T1.pptx").unwrap();
        assert!(short.contains("10 digits"));

        let sep = diagnose_filename("054206000135Hoan-T1.pptx").unwrap();
        assert!(sep.contains("separator after the student id"));

        let spaced = diagnose_filename("054206000135-Doan Hoan-T1.pptx").unwrap();
        assert!(spaced.contains("letters only"));

        let topic = diagnose_filename("054206000135-Hoan-.pptx").unwrap();
        assert!(topic.contains("missing topic"));

        let ext = diagnose_filename("054206000135-Hoan-T1.pdf").unwrap();
        assert!(ext.contains(".pdf"));
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Đoàn Đình Hoàn"), "Doan Dinh Hoan");
        assert_eq!(strip_diacritics("plain"), "plain");
    }
}
