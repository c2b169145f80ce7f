use super::washout::WashoutResult;
use crate::types::{EvidenceSet, GrowthPattern, Heterogeneity, InputRecord, RuleConfig};
use log::debug;

/// Collects benign and malignant supporting features
///
/// Every rule is checked independently and appends at most one reason, in
/// a fixed order. Rules gated on a missing measurement do not fire.
///
/// # Benign
///
/// macroscopic fat, calcification, size < 10 mm, unenhanced HU <= 10,
/// venous HU <= 10, no significant growth, enhancement below threshold
///
/// # Malignant
///
/// enhancement above threshold (or venous HU > 40 without an unenhanced
/// reading), bilateral, growth > 5 mm/year, HU > 20 outside the hematoma
/// pattern, size > 40 mm, heterogeneity, low absolute/relative washout
pub fn classify(
    input: &InputRecord,
    washout: Option<&WashoutResult>,
    config: &RuleConfig,
) -> EvidenceSet {
    let mut evidence = EvidenceSet::new();
    collect_benign(input, config, &mut evidence);
    collect_malignant(input, washout, config, &mut evidence);

    debug!(
        "Evidence: {} benign, {} malignant",
        evidence.benign_reasons.len(),
        evidence.malignant_reasons.len()
    );
    evidence
}

fn collect_benign(input: &InputRecord, config: &RuleConfig, evidence: &mut EvidenceSet) {
    let threshold = config.enhancement_threshold_hu;

    if input.macroscopic_fat() {
        evidence.push_benign("macroscopic fat");
    }
    if input.calcification() {
        evidence.push_benign("calcification");
    }
    if input.size_matches(|size| size < 10.0) {
        evidence.push_benign("size smaller than 1 cm");
    }
    if input.non_contrast_hu().is_some_and(|hu| hu <= 10.0) {
        evidence.push_benign("HU non-contrast ≤ 10");
    }
    if input.venous_hu().is_some_and(|hu| hu <= 10.0) {
        evidence.push_benign("HU venous ≤ 10");
    }
    if input.growth_pattern().is_stable() {
        evidence.push_benign("no significant growth");
    }
    if input.enhancement_hu().is_some_and(|delta| delta < threshold) {
        evidence.push_benign(format!("no enhancement (HU change < {})", threshold));
    }
}

fn collect_malignant(
    input: &InputRecord,
    washout: Option<&WashoutResult>,
    config: &RuleConfig,
    evidence: &mut EvidenceSet,
) {
    let threshold = config.enhancement_threshold_hu;

    match (input.non_contrast_hu(), input.venous_hu()) {
        (Some(nc), Some(venous)) => {
            if venous - nc > threshold {
                evidence.push_malignant(format!("enhancement (HU change > {})", threshold));
            }
        }
        (None, Some(venous)) => {
            if venous > 40.0 {
                evidence.push_malignant("HU venous > 40 (no non-contrast available)");
            }
        }
        _ => {}
    }

    if input.bilateral() {
        evidence.push_malignant("bilateral finding");
    }
    if input.growth_pattern() == GrowthPattern::GrewGt5mmPerYear {
        evidence.push_malignant("growth > 5 mm/year");
    }
    if let (Some(nc), Some(venous)) = (input.non_contrast_hu(), input.venous_hu()) {
        if (venous > 20.0 || nc > 20.0) && !input.is_hematoma_pattern(threshold) {
            evidence.push_malignant("high HU >20 without hematoma pattern");
        }
    }
    if input.size_matches(|size| size > 40.0) {
        evidence.push_malignant("size > 4 cm");
    }
    if input.heterogeneity() == Heterogeneity::Heterogeneous {
        evidence.push_malignant("heterogenicity");
    }

    if let Some(washout) = washout {
        if washout.absolute_is_low() {
            evidence.push_malignant("absolute washout < 60%");
        }
        if washout.relative_is_low() {
            evidence.push_malignant("relative washout < 40%");
        }
    }
}
