use crate::api::Assessment;
use crate::types::InputRecord;
use std::fmt;

/// Text report formatter for an assessment
pub struct TextReport<'a> {
    input: &'a InputRecord,
    assessment: &'a Assessment,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(input: &'a InputRecord, assessment: &'a Assessment) -> Self {
        Self { input, assessment }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assessment = self.assessment;

        writeln!(f, "Preliminary Interpretation")?;
        writeln!(f, "==========================")?;
        writeln!(f)?;

        if self.input.macroscopic_fat_forced() {
            writeln!(
                f,
                "Detected negative HU value → macroscopic fat automatically set."
            )?;
        }
        for warning in &assessment.warnings {
            writeln!(f, "Warning: {}", warning)?;
        }

        if let Some(washout) = &assessment.washout {
            if let Some(abs) = washout.absolute_washout_pct {
                writeln!(f, "Absolute washout: {:.1}%", abs)?;
            }
            if let Some(rel) = washout.relative_washout_pct {
                writeln!(f, "Relative washout: {:.1}%", rel)?;
            }
        }

        let evidence = &assessment.evidence;
        if !evidence.benign_reasons.is_empty() {
            writeln!(
                f,
                "The following features suggest a probably benign etiology: {}.",
                evidence.benign_summary()
            )?;
        }
        if !evidence.malignant_reasons.is_empty() {
            writeln!(
                f,
                "The following features suggest a probably malignant etiology: {}.",
                evidence.malignant_summary()
            )?;
        }
        if evidence.is_empty() {
            writeln!(
                f,
                "No strong benign or malignant indicators found. Further evaluation may be needed."
            )?;
        }

        if !assessment.complementary_notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Complementary Interpretations")?;
            writeln!(f, "-----------------------------")?;
            for note in &assessment.complementary_notes {
                writeln!(f, "- {}", note)?;
            }
        }

        if !assessment.probability_notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Probabilities")?;
            writeln!(f, "-------------")?;
            for note in &assessment.probability_notes {
                writeln!(f, "- {}", note)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Final Conclusion")?;
        writeln!(f, "================")?;
        if let Some(label) = assessment.triage_label {
            writeln!(f, "Triage: {} ({})", label, label.color())?;
        }
        if assessment.has_conclusion() {
            writeln!(f, "{}", assessment.final_conclusion)?;
        } else {
            writeln!(f, "Insufficient input: no rule covers this combination of findings.")?;
        }

        Ok(())
    }
}
