use crate::error::AdrenalError;
use log::warn;

/// Absolute washout below this percentage is non-diagnostic for adenoma
pub const ABSOLUTE_WASHOUT_CUTOFF_PCT: f64 = 60.0;

/// Relative washout below this percentage is non-diagnostic for adenoma
pub const RELATIVE_WASHOUT_CUTOFF_PCT: f64 = 40.0;

/// Contrast washout figures of a three-phase study
///
/// Each figure is `None` when its denominator was zero.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct WashoutResult {
    pub absolute_washout_pct: Option<f64>,
    pub relative_washout_pct: Option<f64>,

    /// Division-by-zero messages for figures that could not be computed
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub warnings: Vec<String>,
}

impl WashoutResult {
    /// Returns whether both figures were computed
    pub fn is_complete(&self) -> bool {
        self.absolute_washout_pct.is_some() && self.relative_washout_pct.is_some()
    }

    /// Returns whether absolute washout is below 60%
    pub fn absolute_is_low(&self) -> bool {
        self.absolute_washout_pct
            .is_some_and(|pct| pct < ABSOLUTE_WASHOUT_CUTOFF_PCT)
    }

    /// Returns whether relative washout is below 40%
    pub fn relative_is_low(&self) -> bool {
        self.relative_washout_pct
            .is_some_and(|pct| pct < RELATIVE_WASHOUT_CUTOFF_PCT)
    }

    /// Both figures computed and at least one below its cutoff
    pub fn is_non_diagnostic(&self) -> bool {
        self.is_complete() && (self.absolute_is_low() || self.relative_is_low())
    }

    /// Both figures computed and both strictly above their cutoffs
    pub fn is_adenoma_like(&self) -> bool {
        match (self.absolute_washout_pct, self.relative_washout_pct) {
            (Some(abs), Some(rel)) => {
                abs > ABSOLUTE_WASHOUT_CUTOFF_PCT && rel > RELATIVE_WASHOUT_CUTOFF_PCT
            }
            _ => false,
        }
    }
}

/// Computes absolute and relative washout
///
/// - absolute = (venous - delayed) / (venous - unenhanced) x 100
/// - relative = (venous - delayed) / venous x 100
///
/// Returns `None` unless all three readings are present. A zero
/// denominator leaves only the affected figure empty and logs a warning;
/// this function never fails.
pub fn compute_washout(
    non_contrast_hu: Option<f64>,
    venous_hu: Option<f64>,
    delayed_hu: Option<f64>,
) -> Option<WashoutResult> {
    let (nc, venous, delayed) = match (non_contrast_hu, venous_hu, delayed_hu) {
        (Some(nc), Some(venous), Some(delayed)) => (nc, venous, delayed),
        _ => return None,
    };

    let mut result = WashoutResult::default();
    let washed_out = venous - delayed;

    match checked_percentage(washed_out, venous - nc, "absolute") {
        Ok(pct) => result.absolute_washout_pct = Some(pct),
        Err(e) => {
            warn!("{}", e);
            result.warnings.push(e.to_string());
        }
    }

    match checked_percentage(washed_out, venous, "relative") {
        Ok(pct) => result.relative_washout_pct = Some(pct),
        Err(e) => {
            warn!("{}", e);
            result.warnings.push(e.to_string());
        }
    }

    Some(result)
}

fn checked_percentage(
    numerator: f64,
    denominator: f64,
    kind: &str,
) -> Result<f64, AdrenalError> {
    if denominator == 0.0 {
        return Err(AdrenalError::DivisionByZero(kind.to_string()));
    }
    Ok(numerator / denominator * 100.0)
}
