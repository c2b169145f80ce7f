use crate::evaluation::{
    classify, complementary_notes, compute_washout, derive_conclusion, estimate_probabilities,
    triage_record, ConclusionBranch, ConclusionContext, WashoutResult,
};
use crate::types::{EvidenceSet, InputRecord, RuleConfig, TriageLabel};
use log::debug;

/// Main evaluator for adrenal mass findings
///
/// Runs every rule component over one [`InputRecord`] and gathers the
/// outputs into an [`Assessment`]. The evaluator only holds its
/// [`RuleConfig`]; each call is independent and side-effect free.
///
/// # Example
///
/// ```
/// use adrenal_core::{AdrenalEvaluator, InputRecord};
///
/// let input = InputRecord::new()
///     .with_size_mm(5.0)
///     .with_macroscopic_fat(true);
///
/// let assessment = AdrenalEvaluator::default().evaluate(&input);
///
/// assert!(assessment
///     .evidence
///     .benign_reasons
///     .contains(&"macroscopic fat".to_string()));
/// assert_eq!(
///     assessment.final_conclusion,
///     "The mass is probably a Myelolipoma. No follow-up needed."
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdrenalEvaluator {
    config: RuleConfig,
}

impl AdrenalEvaluator {
    /// Creates an evaluator with the given thresholds
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Returns the active thresholds
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Evaluates one mass
    pub fn evaluate(&self, input: &InputRecord) -> Assessment {
        let washout = compute_washout(input.non_contrast_hu(), input.venous_hu(), input.delayed_hu());
        let evidence = classify(input, washout.as_ref(), &self.config);

        let ctx = ConclusionContext {
            input,
            washout: washout.as_ref(),
            malignant_reasons: &evidence.malignant_reasons,
            config: &self.config,
        };
        let conclusion = derive_conclusion(&ctx);

        let warnings = washout
            .as_ref()
            .map(|w| w.warnings.clone())
            .unwrap_or_default();

        let assessment = Assessment {
            triage_label: triage_record(input),
            probability_notes: estimate_probabilities(input),
            complementary_notes: complementary_notes(input, &self.config),
            branch: conclusion.as_ref().map(|c| c.branch),
            final_conclusion: conclusion.map(|c| c.text).unwrap_or_default(),
            evidence,
            washout,
            warnings,
        };

        debug!(
            "Assessment: triage={:?}, branch={:?}",
            assessment.triage_label, assessment.branch
        );
        assessment
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Assessment {
    /// Coarse label from density and size alone
    pub triage_label: Option<TriageLabel>,

    /// Benign and malignant supporting features
    pub evidence: EvidenceSet,

    /// Risk of malignancy by referral reason, age and size
    pub probability_notes: Vec<String>,

    /// Washout figures, present when all three phases were measured
    pub washout: Option<WashoutResult>,

    /// Advisory interpretation hints
    pub complementary_notes: Vec<String>,

    /// Ladder branch that produced the conclusion
    pub branch: Option<ConclusionBranch>,

    /// Final recommendation; empty when the input is outside rule coverage
    pub final_conclusion: String,

    /// Non-fatal problems met during evaluation
    pub warnings: Vec<String>,
}

impl Assessment {
    /// Returns whether a recommendation was produced
    pub fn has_conclusion(&self) -> bool {
        !self.final_conclusion.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GrowthPattern, ReferralReason};

    #[test]
    fn test_evaluate_low_attenuation_with_washout_caveat() {
        let input = InputRecord::new()
            .with_size_mm(15.0)
            .with_non_contrast_hu(5.0)
            .with_venous_hu(8.0)
            .with_delayed_hu(7.0);

        let assessment = AdrenalEvaluator::default().evaluate(&input);

        assert_eq!(assessment.branch, Some(ConclusionBranch::LowAttenuation));
        assert_eq!(
            assessment.final_conclusion,
            "Due to low attenuation, no follow-up needed. But, due to the existence of \
             absolute washout < 60%, relative washout < 40%, consider biochemical assays to \
             determine functional status."
        );
        assert_eq!(assessment.triage_label, Some(TriageLabel::ProbablyBenign));
        assert!(assessment.warnings.is_empty());
    }

    #[test]
    fn test_evaluate_collects_all_outputs() {
        let input = InputRecord::new()
            .with_age(50)
            .with_size_mm(45.0)
            .with_referral_reason(ReferralReason::CancerWorkup)
            .with_growth_pattern(GrowthPattern::GrewGt5mmPerYear);

        let assessment = AdrenalEvaluator::default().evaluate(&input);

        assert_eq!(assessment.triage_label, Some(TriageLabel::ProbablyMalignant));
        assert_eq!(assessment.probability_notes.len(), 3);
        assert!(assessment.washout.is_none());
        assert!(assessment.has_conclusion());
        assert_eq!(
            assessment.final_conclusion,
            "Consider Resection and biochemical assays."
        );
        assert_eq!(
            assessment.complementary_notes,
            vec!["Probability of adrenal carcinoma is very low due to size < 5 cm."]
        );
    }

    #[test]
    fn test_washout_warning_surfaces() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_non_contrast_hu(30.0)
            .with_venous_hu(30.0)
            .with_delayed_hu(20.0);

        let assessment = AdrenalEvaluator::default().evaluate(&input);
        assert_eq!(
            assessment.warnings,
            vec!["Division by zero in absolute washout calculation".to_string()]
        );
        // Flat enhancement reads as the hematoma pattern
        assert_eq!(assessment.branch, Some(ConclusionBranch::Hematoma));
    }

    #[test]
    fn test_configured_threshold_changes_ladder() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_non_contrast_hu(25.0)
            .with_venous_hu(33.0);

        let default = AdrenalEvaluator::default().evaluate(&input);
        assert_eq!(default.branch, Some(ConclusionBranch::Hematoma));

        let strict =
            AdrenalEvaluator::new(RuleConfig::default().with_enhancement_threshold_hu(6.0))
                .evaluate(&input);
        assert_eq!(strict.branch, Some(ConclusionBranch::IndeterminateUnscanned));
        assert_eq!(strict.final_conclusion, "Consider Adrenal CT.");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_assessment_serializes_to_json() {
        let input = InputRecord::new()
            .with_size_mm(30.0)
            .with_referral_reason(ReferralReason::Incidentaloma)
            .with_non_contrast_hu(-20.0);

        let assessment = AdrenalEvaluator::default().evaluate(&input);
        let value = serde_json::to_value(&assessment).unwrap();

        assert_eq!(value["triage_label"], "probably_benign");
        assert_eq!(value["branch"], "myelolipoma");
        assert_eq!(value["final_conclusion"], assessment.final_conclusion.as_str());
    }
}
