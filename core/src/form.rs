//! Raw form input to [`InputRecord`]
//!
//! This is the input-collection boundary: text fields as typed by a user,
//! modality checkboxes, and categorical selections. Required fields are
//! enforced here so the evaluator never sees a request without a lesion
//! size and at least one imaging modality.

use crate::error::{AdrenalError, Result};
use crate::types::{GrowthPattern, Heterogeneity, InputRecord, ReferralReason};
use log::warn;
use regex::Regex;
use std::sync::OnceLock;

/// Raw, unvalidated assessment form
///
/// # Example
///
/// ```
/// use adrenal_core::AssessmentForm;
///
/// let form = AssessmentForm {
///     size_mm: "25 mm".to_string(),
///     use_non_contrast_ct: true,
///     non_contrast_hu: "-15".to_string(),
///     ..Default::default()
/// };
///
/// let parsed = form.parse().unwrap();
/// assert_eq!(parsed.record.size_mm(), Some(25.0));
/// assert!(parsed.record.macroscopic_fat());
/// assert!(parsed.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AssessmentForm {
    pub age: String,
    pub size_mm: String,
    pub history_of_cancer: bool,
    pub referral_reason: String,
    pub use_non_contrast_ct: bool,
    pub use_contrast_ct: bool,
    pub non_contrast_hu: String,
    pub venous_hu: String,
    pub delayed_hu: String,
    pub growth_pattern: String,
    pub bilateral: bool,
    pub heterogeneity: String,
    pub macroscopic_fat: bool,
    pub cystic: bool,
    pub calcification: bool,
}

/// Validated record plus any fields that were dropped on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    pub record: InputRecord,
    pub warnings: Vec<String>,
}

impl AssessmentForm {
    /// Returns whether at least one imaging modality was selected
    pub fn has_modality(&self) -> bool {
        self.use_non_contrast_ct || self.use_contrast_ct
    }

    /// Validates the form and builds the input record
    ///
    /// HU fields are read only for selected modalities. A malformed
    /// numeric field is dropped with a warning and evaluation continues
    /// without it.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredInput` when the size is empty or no
    /// modality was selected, and `InvalidValue` for an unknown growth
    /// pattern.
    pub fn parse(&self) -> Result<ParsedForm> {
        if self.size_mm.trim().is_empty() || !self.has_modality() {
            return Err(AdrenalError::MissingRequiredInput(
                "Please provide lesion size and select at least one imaging modality.".to_string(),
            ));
        }

        let mut warnings = Vec::new();
        let mut record = InputRecord::new()
            .with_history_of_cancer(self.history_of_cancer)
            .with_referral_reason(ReferralReason::from_str(&self.referral_reason))
            .with_bilateral(self.bilateral)
            .with_heterogeneity(Heterogeneity::from_str(&self.heterogeneity))
            .with_macroscopic_fat(self.macroscopic_fat)
            .with_cystic(self.cystic)
            .with_calcification(self.calcification);

        if !self.growth_pattern.trim().is_empty() {
            record = record.with_growth_pattern(GrowthPattern::parse(&self.growth_pattern)?);
        }

        if let Some(age) = degrade(parse_age(&self.age), &mut warnings) {
            record = record.with_age(age);
        }
        if let Some(size) = degrade(
            require_number("size_mm", &self.size_mm).and_then(|v| non_negative("size_mm", v)),
            &mut warnings,
        ) {
            record = record.with_size_mm(size);
        }

        if self.use_non_contrast_ct {
            if let Some(hu) = degrade(
                parse_optional_number("non_contrast_hu", &self.non_contrast_hu),
                &mut warnings,
            ) {
                record = record.with_non_contrast_hu(hu);
            }
        }
        if self.use_contrast_ct {
            if let Some(hu) = degrade(
                parse_optional_number("venous_hu", &self.venous_hu),
                &mut warnings,
            ) {
                record = record.with_venous_hu(hu);
            }
            if let Some(hu) = degrade(
                parse_optional_number("delayed_hu", &self.delayed_hu),
                &mut warnings,
            ) {
                record = record.with_delayed_hu(hu);
            }
        }

        Ok(ParsedForm { record, warnings })
    }
}

/// Turns a field error into a warning and an absent value
fn degrade<T>(value: Result<Option<T>>, warnings: &mut Vec<String>) -> Option<T> {
    match value {
        Ok(value) => value,
        Err(e) => {
            warn!("{}", e);
            warnings.push(e.to_string());
            None
        }
    }
}

/// Parses a measurement such as "12.5", "12,5", "25 mm" or "-15 HU"
///
/// Empty text is `Ok(None)`.
///
/// # Errors
///
/// Returns `InvalidNumericInput` for anything that is not a number with an
/// optional unit.
pub fn parse_optional_number(field: &'static str, raw: &str) -> Result<Option<f64>> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*([-+]?(?:\d+(?:[.,]\d*)?|[.,]\d+))\s*(?:mm|hu)?\s*$")
            .expect("Failed to compile regex")
    });

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let invalid = || AdrenalError::InvalidNumericInput {
        field,
        value: raw.to_string(),
    };
    let number = re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or_else(invalid)?
        .as_str()
        .replace(',', ".");

    number.parse::<f64>().map(Some).map_err(|_| invalid())
}

/// Like [`parse_optional_number`], but empty text is `MissingValue`
pub fn require_number(field: &'static str, raw: &str) -> Result<Option<f64>> {
    match parse_optional_number(field, raw)? {
        Some(value) => Ok(Some(value)),
        None => Err(AdrenalError::MissingValue { field }),
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if v < 0.0 => Err(AdrenalError::InvalidNumericInput {
            field,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

fn parse_age(raw: &str) -> Result<Option<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| AdrenalError::InvalidNumericInput {
            field: "age",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn contrast_form(size: &str) -> AssessmentForm {
        AssessmentForm {
            size_mm: size.to_string(),
            use_contrast_ct: true,
            ..Default::default()
        }
    }

    #[rstest]
    #[case("12", 12.0)]
    #[case("12.5", 12.5)]
    #[case("12,5", 12.5)]
    #[case("-15", -15.0)]
    #[case("+4", 4.0)]
    #[case(" 25 mm ", 25.0)]
    #[case("-15 HU", -15.0)]
    #[case("30hu", 30.0)]
    #[case(".5", 0.5)]
    fn test_parse_number(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_optional_number("x", raw).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("12 cm")]
    #[case("1.2.3")]
    #[case("-")]
    fn test_parse_number_invalid(#[case] raw: &str) {
        assert!(matches!(
            parse_optional_number("x", raw),
            Err(AdrenalError::InvalidNumericInput { field: "x", .. })
        ));
    }

    #[test]
    fn test_empty_is_absent_or_missing() {
        assert_eq!(parse_optional_number("x", "  ").unwrap(), None);
        assert!(matches!(
            require_number("size_mm", ""),
            Err(AdrenalError::MissingValue { field: "size_mm" })
        ));
    }

    #[test]
    fn test_missing_size_rejected() {
        let form = contrast_form("");
        assert!(matches!(
            form.parse(),
            Err(AdrenalError::MissingRequiredInput(_))
        ));
    }

    #[test]
    fn test_missing_modality_rejected() {
        let form = AssessmentForm {
            size_mm: "20".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.parse(),
            Err(AdrenalError::MissingRequiredInput(_))
        ));
    }

    #[test]
    fn test_unselected_modality_fields_ignored() {
        let form = AssessmentForm {
            size_mm: "20".to_string(),
            use_contrast_ct: true,
            non_contrast_hu: "-30".to_string(),
            venous_hu: "45".to_string(),
            ..Default::default()
        };
        let parsed = form.parse().unwrap();
        assert_eq!(parsed.record.non_contrast_hu(), None);
        assert_eq!(parsed.record.venous_hu(), Some(45.0));
        assert!(!parsed.record.macroscopic_fat());
    }

    #[test]
    fn test_malformed_field_degrades_alone() {
        let form = AssessmentForm {
            age: "sixty".to_string(),
            venous_hu: "8".to_string(),
            delayed_hu: "x7".to_string(),
            ..contrast_form("15")
        };
        let parsed = form.parse().unwrap();
        assert_eq!(parsed.record.age(), None);
        assert_eq!(parsed.record.size_mm(), Some(15.0));
        assert_eq!(parsed.record.venous_hu(), Some(8.0));
        assert_eq!(parsed.record.delayed_hu(), None);
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn test_negative_size_dropped() {
        let parsed = contrast_form("-4").parse().unwrap();
        assert_eq!(parsed.record.size_mm(), None);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_categorical_fields() {
        let form = AssessmentForm {
            referral_reason: "Cancer work-up".to_string(),
            growth_pattern: "Increased >5 mm/year".to_string(),
            heterogeneity: "Heterogen".to_string(),
            ..contrast_form("30")
        };
        let record = form.parse().unwrap().record;
        assert_eq!(record.referral_reason(), ReferralReason::CancerWorkup);
        assert_eq!(record.growth_pattern(), GrowthPattern::GrewGt5mmPerYear);
        assert_eq!(record.heterogeneity(), Heterogeneity::Heterogeneous);
    }

    #[test]
    fn test_unknown_growth_pattern_is_error() {
        let form = AssessmentForm {
            growth_pattern: "shrinking".to_string(),
            ..contrast_form("30")
        };
        assert!(matches!(form.parse(), Err(AdrenalError::InvalidValue(_))));
    }
}
