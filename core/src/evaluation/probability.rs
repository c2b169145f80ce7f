//! Fixed epidemiological risk of malignancy by referral reason, age and size

use crate::types::{InputRecord, ReferralReason};

/// Risk note for the referral reason, if one applies
pub fn referral_risk_note(reason: ReferralReason) -> Option<String> {
    reason.malignancy_risk_pct().map(|pct| {
        format!(
            "The risk of malignancy because of the referral reason is {}%.",
            pct
        )
    })
}

/// Age-related risk of malignancy, in percent
///
/// Brackets: <18, 18-39, 40-65, >65
pub fn age_risk_pct(age: u32) -> u32 {
    match age {
        0..=17 => 62,
        18..=39 => 4,
        40..=65 => 6,
        _ => 11,
    }
}

pub fn age_risk_note(age: Option<u32>) -> Option<String> {
    age.map(|age| format!("Age-related risk of malignancy is {}%.", age_risk_pct(age)))
}

/// Size-related risk note
///
/// Brackets: <40 mm, 40-60 mm, >60 mm. Above 60 mm the note splits the
/// risk between adrenal carcinoma and metastasis.
pub fn size_risk_note(size_mm: Option<f64>) -> Option<String> {
    let size = size_mm?;
    let note = if size < 40.0 {
        "Size-related risk of malignancy is 2%."
    } else if size <= 60.0 {
        "Size-related risk of malignancy is 6%."
    } else {
        "Size-related risk of adrenal carcinoma is 25% and for metastasis is 18%."
    };
    Some(note.to_string())
}

/// Collects the applicable probability notes (referral, age, size)
pub fn estimate_probabilities(input: &InputRecord) -> Vec<String> {
    [
        referral_risk_note(input.referral_reason()),
        age_risk_note(input.age()),
        size_risk_note(input.size_mm()),
    ]
    .into_iter()
    .flatten()
    .collect()
}
