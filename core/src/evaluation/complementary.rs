use crate::types::{Heterogeneity, InputRecord, RuleConfig};

const HYPERVASCULAR_HINT: &str =
    "consider hypervascular tumors such as RCC, HCC, or pheochromocytoma.";

/// Collects complementary interpretation notes
///
/// These are advisory hints shown next to the evidence lists; they do not
/// feed the conclusion ladder.
pub fn complementary_notes(input: &InputRecord, config: &RuleConfig) -> Vec<String> {
    let mut notes = Vec::new();

    if input.macroscopic_fat() {
        notes.push("Probably myelolipoma – no follow-up needed.".to_string());
    }
    if input.bilateral() {
        notes.push(
            "Due to bilateral findings, consider pheochromocytoma, bilateral macronodular \
             hyperplasia, congenital adrenal hyperplasia, ACTH-dependent Cushing, lymphoma, \
             infection, bleeding, metastasis, granulomatous disease or 21-hydroxylase deficiency."
                .to_string(),
        );
    }
    if input.non_contrast_hu().is_some_and(|hu| hu > 20.0) {
        notes.push("Due to HU > 20, check plasma metanephrines.".to_string());
    }
    if input.heterogeneity() == Heterogeneity::Heterogeneous {
        notes.push("Due to heterogenicity, check plasma metanephrines.".to_string());
    }
    if input.venous_hu().is_some_and(|hu| hu > 120.0) {
        notes.push(format!("HU venous > 120 – {}", HYPERVASCULAR_HINT));
    }
    if input.delayed_hu().is_some_and(|hu| hu > 120.0) {
        notes.push(format!("HU delayed > 120 – {}", HYPERVASCULAR_HINT));
    }
    if is_stable_dense_mass(input, config.hematoma_note_delta_hu) {
        notes.push("Probably hematoma – no follow-up needed.".to_string());
    }
    if input.size_matches(|size| size < 50.0) {
        notes.push("Probability of adrenal carcinoma is very low due to size < 5 cm.".to_string());
    }

    notes
}

/// All three phases above 20 HU and nearly flat across phases
fn is_stable_dense_mass(input: &InputRecord, max_delta: f64) -> bool {
    match (input.non_contrast_hu(), input.venous_hu(), input.delayed_hu()) {
        (Some(nc), Some(venous), Some(delayed)) => {
            nc > 20.0
                && venous > 20.0
                && delayed > 20.0
                && (nc - venous).abs() < max_delta
                && (nc - delayed).abs() < max_delta
        }
        _ => false,
    }
}
