//! Final recommendation ladder
//!
//! The ladder is an ordered list of tagged branches. Branches are tried
//! top to bottom and the first one whose predicate holds produces the
//! recommendation; nothing below it is consulted. Later branches may
//! overlap earlier ones, so the order in [`CONCLUSION_LADDER`] is part of
//! the rule set.

use super::washout::WashoutResult;
use crate::types::{GrowthPattern, InputRecord, RuleConfig};
use log::debug;
use std::fmt;

const STAGED_WORKUP: &str = "Depending on the clinical scenario, control with adrenal CT, \
                             biopsy, PET-CT or resection should be considered, also consider \
                             biochemical assays.";

/// One rung of the conclusion ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum ConclusionBranch {
    /// Size >= 40 mm
    LargeMass,
    /// Macroscopic fat
    Myelolipoma,
    /// Less than threshold enhancement with venous HU > 20
    Hematoma,
    /// Unenhanced or venous HU <= 10
    LowAttenuation,
    Calcification,
    /// Size <= 10 mm
    SmallSize,
    /// 10-20 mm, no prior scan, no cancer history
    SmallUnscanned,
    /// 10-40 mm, growth < 5 mm/year
    SlowGrowth,
    /// 10-40 mm, growth > 5 mm/year or in doubt, no cancer history
    GrowingWithoutHistory,
    /// 10-40 mm, growth > 5 mm/year or in doubt, with cancer history
    GrowingWithHistory,
    /// 20-40 mm, no prior scan
    IndeterminateUnscanned,
}

/// Evaluation order of the ladder
pub const CONCLUSION_LADDER: [ConclusionBranch; 11] = [
    ConclusionBranch::LargeMass,
    ConclusionBranch::Myelolipoma,
    ConclusionBranch::Hematoma,
    ConclusionBranch::LowAttenuation,
    ConclusionBranch::Calcification,
    ConclusionBranch::SmallSize,
    ConclusionBranch::SmallUnscanned,
    ConclusionBranch::SlowGrowth,
    ConclusionBranch::GrowingWithoutHistory,
    ConclusionBranch::GrowingWithHistory,
    ConclusionBranch::IndeterminateUnscanned,
];

/// Everything the ladder reads
#[derive(Debug, Clone, Copy)]
pub struct ConclusionContext<'a> {
    pub input: &'a InputRecord,
    pub washout: Option<&'a WashoutResult>,
    pub malignant_reasons: &'a [String],
    pub config: &'a RuleConfig,
}

impl ConclusionBranch {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ConclusionBranch::LargeMass => "large-mass",
            ConclusionBranch::Myelolipoma => "myelolipoma",
            ConclusionBranch::Hematoma => "hematoma",
            ConclusionBranch::LowAttenuation => "low-attenuation",
            ConclusionBranch::Calcification => "calcification",
            ConclusionBranch::SmallSize => "small-size",
            ConclusionBranch::SmallUnscanned => "small-unscanned",
            ConclusionBranch::SlowGrowth => "slow-growth",
            ConclusionBranch::GrowingWithoutHistory => "growing-without-history",
            ConclusionBranch::GrowingWithHistory => "growing-with-history",
            ConclusionBranch::IndeterminateUnscanned => "indeterminate-unscanned",
        }
    }

    /// Returns whether this branch's guard holds
    pub fn matches(&self, ctx: &ConclusionContext<'_>) -> bool {
        let input = ctx.input;
        let growth = input.growth_pattern();
        let history = input.history_of_cancer();

        match self {
            ConclusionBranch::LargeMass => input.size_matches(|s| s >= 40.0),
            ConclusionBranch::Myelolipoma => input.macroscopic_fat(),
            ConclusionBranch::Hematoma => {
                input.is_hematoma_pattern(ctx.config.enhancement_threshold_hu)
            }
            ConclusionBranch::LowAttenuation => input.any_attenuation(|hu| hu <= 10.0),
            ConclusionBranch::Calcification => input.calcification(),
            ConclusionBranch::SmallSize => input.size_matches(|s| s <= 10.0),
            ConclusionBranch::SmallUnscanned => {
                input.size_matches(|s| s > 10.0 && s <= 20.0)
                    && growth == GrowthPattern::NoPriorScan
                    && !history
            }
            ConclusionBranch::SlowGrowth => {
                input.size_matches(|s| s > 10.0 && s <= 40.0)
                    && growth == GrowthPattern::GrewLt5mmPerYear
            }
            ConclusionBranch::GrowingWithoutHistory => {
                input.size_matches(|s| s > 10.0 && s <= 40.0) && growth.is_suspicious() && !history
            }
            ConclusionBranch::GrowingWithHistory => {
                input.size_matches(|s| s > 10.0 && s <= 40.0) && growth.is_suspicious() && history
            }
            ConclusionBranch::IndeterminateUnscanned => {
                input.size_matches(|s| s > 20.0 && s < 40.0) && growth == GrowthPattern::NoPriorScan
            }
        }
    }

    /// Returns whether malignant features are appended as a caveat
    pub fn carries_caveat(&self) -> bool {
        matches!(
            self,
            ConclusionBranch::Myelolipoma
                | ConclusionBranch::Hematoma
                | ConclusionBranch::LowAttenuation
                | ConclusionBranch::Calcification
                | ConclusionBranch::SmallSize
                | ConclusionBranch::SlowGrowth
        )
    }

    /// Recommendation text for this branch, without caveat
    fn recommendation(&self, ctx: &ConclusionContext<'_>) -> String {
        let input = ctx.input;
        let history = input.history_of_cancer();

        let text = match self {
            ConclusionBranch::LargeMass if history => {
                "Consider biopsy or PET-CT, also consider biochemical assays."
            }
            ConclusionBranch::LargeMass => "Consider Resection and biochemical assays.",
            ConclusionBranch::Myelolipoma => {
                "The mass is probably a Myelolipoma. No follow-up needed."
            }
            ConclusionBranch::Hematoma => {
                "There is a hematoma enhancement pattern. No follow-up needed."
            }
            ConclusionBranch::LowAttenuation => "Due to low attenuation, no follow-up needed.",
            ConclusionBranch::Calcification => {
                "Calcification of the mass is a benign sign. No follow-up needed."
            }
            ConclusionBranch::SmallSize => "Due to small size, no follow-up needed.",
            ConclusionBranch::SmallUnscanned => {
                "Probably benign, but consider biochemical assays to determine functional \
                 status and consider adrenal CT scanning after 12 months."
            }
            ConclusionBranch::SlowGrowth => "Probably benign, No follow-up needed.",
            ConclusionBranch::GrowingWithoutHistory => {
                let non_diagnostic = ctx.washout.is_some_and(WashoutResult::is_non_diagnostic);
                if input.has_all_phases() && non_diagnostic {
                    "Depending on the clinical scenario, Control with Adrenal CT, biopsy, \
                     PET-CT or Resection should be considered, also consider biochemical assays."
                } else {
                    "Resection recommended. Consider biochemical assays and adrenal CT."
                }
            }
            ConclusionBranch::GrowingWithHistory => {
                "Consider biopsy or PET-CT, including biochemical assays."
            }
            ConclusionBranch::IndeterminateUnscanned => indeterminate_recommendation(ctx),
        };
        text.to_string()
    }
}

impl fmt::Display for ConclusionBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// 20-40 mm mass without prior imaging
///
/// Needs a full three-phase study; otherwise a dedicated adrenal CT is
/// recommended first.
fn indeterminate_recommendation(ctx: &ConclusionContext<'_>) -> &'static str {
    let input = ctx.input;
    if !input.has_all_phases() {
        return "Consider Adrenal CT.";
    }

    let unenhancing = input
        .enhancement_hu()
        .is_some_and(|delta| delta < ctx.config.enhancement_threshold_hu);
    let low_attenuation = input.non_contrast_hu().is_some_and(|hu| hu <= 10.0);

    if unenhancing || low_attenuation {
        "Probably benign. No follow-up needed."
    } else if ctx.washout.is_some_and(WashoutResult::is_adenoma_like) {
        if input.history_of_cancer() {
            "Probably benign. No follow-up needed. Biochemical assays may be considered."
        } else {
            "Probably benign, No follow-up needed, but biochemical assays to determine \
             functional status can be considered."
        }
    } else {
        STAGED_WORKUP
    }
}

/// Appended to benign conclusions when malignant features are present
pub fn malignancy_caveat(malignant_reasons: &[String]) -> Option<String> {
    if malignant_reasons.is_empty() {
        return None;
    }
    Some(format!(
        "But, due to the existence of {}, consider biochemical assays to determine functional status.",
        malignant_reasons.join(", ")
    ))
}

/// Final recommendation with the branch that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Conclusion {
    pub branch: ConclusionBranch,
    pub text: String,
}

/// Runs the ladder and returns the first matching branch's conclusion
///
/// Returns `None` when no branch matches, i.e. the input is outside the
/// encoded rule coverage.
pub fn derive_conclusion(ctx: &ConclusionContext<'_>) -> Option<Conclusion> {
    let branch = CONCLUSION_LADDER
        .iter()
        .copied()
        .find(|branch| branch.matches(ctx));

    let Some(branch) = branch else {
        debug!("No conclusion branch matched");
        return None;
    };
    debug!("Conclusion branch: {}", branch);

    let mut text = branch.recommendation(ctx);
    if branch.carries_caveat() {
        if let Some(caveat) = malignancy_caveat(ctx.malignant_reasons) {
            text.push(' ');
            text.push_str(&caveat);
        }
    }

    Some(Conclusion { branch, text })
}

/// Final recommendation text
///
/// Empty when no branch matches; callers must read that as insufficient
/// input, not as a recommendation.
pub fn conclude(
    input: &InputRecord,
    washout: Option<&WashoutResult>,
    malignant_reasons: &[String],
    config: &RuleConfig,
) -> String {
    let ctx = ConclusionContext {
        input,
        washout,
        malignant_reasons,
        config,
    };
    derive_conclusion(&ctx)
        .map(|conclusion| conclusion.text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::washout::compute_washout;

    fn run(input: &InputRecord, malignant: &[&str]) -> Option<Conclusion> {
        let washout = compute_washout(input.non_contrast_hu(), input.venous_hu(), input.delayed_hu());
        let reasons: Vec<String> = malignant.iter().map(|s| s.to_string()).collect();
        let config = RuleConfig::default();
        let ctx = ConclusionContext {
            input,
            washout: washout.as_ref(),
            malignant_reasons: &reasons,
            config: &config,
        };
        derive_conclusion(&ctx)
    }

    fn branch_of(input: &InputRecord) -> Option<ConclusionBranch> {
        run(input, &[]).map(|c| c.branch)
    }

    fn text_of(input: &InputRecord) -> String {
        run(input, &[]).map(|c| c.text).unwrap_or_default()
    }

    #[test]
    fn test_large_mass_depends_on_history() {
        let input = InputRecord::new().with_size_mm(40.0);
        assert_eq!(text_of(&input), "Consider Resection and biochemical assays.");

        let input = input.with_history_of_cancer(true);
        assert_eq!(
            text_of(&input),
            "Consider biopsy or PET-CT, also consider biochemical assays."
        );
    }

    #[test]
    fn test_large_mass_outranks_fat() {
        let input = InputRecord::new()
            .with_size_mm(55.0)
            .with_macroscopic_fat(true);
        assert_eq!(branch_of(&input), Some(ConclusionBranch::LargeMass));
    }

    #[test]
    fn test_myelolipoma_with_caveat() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_macroscopic_fat(true);
        let conclusion = run(&input, &["bilateral finding", "heterogenicity"]).unwrap();
        assert_eq!(conclusion.branch, ConclusionBranch::Myelolipoma);
        assert_eq!(
            conclusion.text,
            "The mass is probably a Myelolipoma. No follow-up needed. But, due to the \
             existence of bilateral finding, heterogenicity, consider biochemical assays to \
             determine functional status."
        );
    }

    #[test]
    fn test_hematoma_before_low_attenuation() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_non_contrast_hu(25.0)
            .with_venous_hu(28.0);
        assert_eq!(branch_of(&input), Some(ConclusionBranch::Hematoma));
        assert_eq!(
            text_of(&input),
            "There is a hematoma enhancement pattern. No follow-up needed."
        );
    }

    #[test]
    fn test_low_attenuation() {
        let input = InputRecord::new().with_size_mm(30.0).with_venous_hu(10.0);
        assert_eq!(branch_of(&input), Some(ConclusionBranch::LowAttenuation));
    }

    #[test]
    fn test_calcification_then_small_size() {
        let input = InputRecord::new()
            .with_size_mm(8.0)
            .with_calcification(true);
        assert_eq!(
            text_of(&input),
            "Calcification of the mass is a benign sign. No follow-up needed."
        );

        let input = InputRecord::new().with_size_mm(10.0);
        assert_eq!(text_of(&input), "Due to small size, no follow-up needed.");
    }

    #[test]
    fn test_small_unscanned_without_history() {
        let input = InputRecord::new()
            .with_size_mm(15.0)
            .with_growth_pattern(GrowthPattern::NoPriorScan);
        assert_eq!(branch_of(&input), Some(ConclusionBranch::SmallUnscanned));
        let conclusion = run(&input, &["bilateral finding"]).unwrap();
        assert!(!conclusion.text.contains("But, due to"));
    }

    #[test]
    fn test_small_unscanned_with_history_is_uncovered() {
        let input = InputRecord::new()
            .with_size_mm(15.0)
            .with_history_of_cancer(true)
            .with_growth_pattern(GrowthPattern::NoPriorScan);
        assert_eq!(branch_of(&input), None);
        assert_eq!(
            conclude(&input, None, &[], &RuleConfig::default()),
            String::new()
        );
    }

    #[test]
    fn test_slow_growth_with_caveat() {
        let input = InputRecord::new()
            .with_size_mm(35.0)
            .with_growth_pattern(GrowthPattern::GrewLt5mmPerYear);
        let conclusion = run(&input, &["bilateral finding"]).unwrap();
        assert_eq!(conclusion.branch, ConclusionBranch::SlowGrowth);
        assert_eq!(
            conclusion.text,
            "Probably benign, No follow-up needed. But, due to the existence of bilateral \
             finding, consider biochemical assays to determine functional status."
        );
    }

    #[test]
    fn test_growing_without_history_incomplete_phases() {
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_venous_hu(60.0)
            .with_growth_pattern(GrowthPattern::GrewGt5mmPerYear);
        assert_eq!(
            text_of(&input),
            "Resection recommended. Consider biochemical assays and adrenal CT."
        );
    }

    #[test]
    fn test_growing_without_history_low_washout() {
        // abs = 10 / 50 = 20%
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_non_contrast_hu(30.0)
            .with_venous_hu(80.0)
            .with_delayed_hu(70.0)
            .with_growth_pattern(GrowthPattern::InDoubt);
        assert_eq!(
            text_of(&input),
            "Depending on the clinical scenario, Control with Adrenal CT, biopsy, PET-CT or \
             Resection should be considered, also consider biochemical assays."
        );
    }

    #[test]
    fn test_growing_without_history_adenoma_washout() {
        // abs = 50 / 60 = 83%, rel = 50 / 80 = 62.5%
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_non_contrast_hu(20.0)
            .with_venous_hu(80.0)
            .with_delayed_hu(30.0)
            .with_growth_pattern(GrowthPattern::InDoubt);
        assert_eq!(
            text_of(&input),
            "Resection recommended. Consider biochemical assays and adrenal CT."
        );
    }

    #[test]
    fn test_growing_with_history() {
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_history_of_cancer(true)
            .with_growth_pattern(GrowthPattern::GrewGt5mmPerYear);
        assert_eq!(
            text_of(&input),
            "Consider biopsy or PET-CT, including biochemical assays."
        );
    }

    #[test]
    fn test_indeterminate_needs_all_phases() {
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_venous_hu(60.0)
            .with_delayed_hu(40.0);
        assert_eq!(text_of(&input), "Consider Adrenal CT.");
    }

    #[test]
    fn test_indeterminate_adenoma_washout_by_history() {
        let base = InputRecord::new()
            .with_size_mm(30.0)
            .with_non_contrast_hu(20.0)
            .with_venous_hu(80.0)
            .with_delayed_hu(30.0);

        assert_eq!(
            text_of(&base),
            "Probably benign, No follow-up needed, but biochemical assays to determine \
             functional status can be considered."
        );
        assert_eq!(
            text_of(&base.with_history_of_cancer(true)),
            "Probably benign. No follow-up needed. Biochemical assays may be considered."
        );
    }

    #[test]
    fn test_indeterminate_low_washout_staged_workup() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_non_contrast_hu(30.0)
            .with_venous_hu(80.0)
            .with_delayed_hu(70.0);
        assert_eq!(branch_of(&input), Some(ConclusionBranch::IndeterminateUnscanned));
        assert_eq!(text_of(&input), STAGED_WORKUP);
    }

    #[test]
    fn test_caveat_only_when_reasons_present() {
        assert_eq!(malignancy_caveat(&[]), None);
        assert_eq!(
            malignancy_caveat(&["size > 4 cm".to_string()]).as_deref(),
            Some(
                "But, due to the existence of size > 4 cm, consider biochemical assays to \
                 determine functional status."
            )
        );
    }

    #[test]
    fn test_indeterminate_unenhancing_is_benign() {
        // Unenhanced above 10 HU, venous below the hematoma cutoff
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_non_contrast_hu(15.0)
            .with_venous_hu(18.0)
            .with_delayed_hu(17.0);
        let conclusion = run(&input, &["absolute washout < 60%"]).unwrap();
        assert_eq!(conclusion.branch, ConclusionBranch::IndeterminateUnscanned);
        assert_eq!(conclusion.text, "Probably benign. No follow-up needed.");
    }

    #[test]
    fn test_indeterminate_flat_enhancement_without_absolute_washout() {
        let input = InputRecord::new()
            .with_size_mm(25.0)
            .with_non_contrast_hu(15.0)
            .with_venous_hu(15.0)
            .with_delayed_hu(5.0);

        let washout = compute_washout(input.non_contrast_hu(), input.venous_hu(), input.delayed_hu())
            .unwrap();
        assert_eq!(washout.absolute_washout_pct, None);
        assert_eq!(
            washout.warnings,
            vec!["Division by zero in absolute washout calculation".to_string()]
        );

        let conclusion = run(&input, &[]).unwrap();
        assert_eq!(conclusion.branch, ConclusionBranch::IndeterminateUnscanned);
        assert_eq!(conclusion.text, "Probably benign. No follow-up needed.");
    }

    #[test]
    fn test_missing_size_reaches_no_size_branch() {
        let input = InputRecord::new().with_venous_hu(60.0);
        assert_eq!(branch_of(&input), None);
    }
}
