use crate::types::{InputRecord, TriageLabel};

/// Assigns the coarse triage label
///
/// First match wins, in this order:
///
/// 1. HU < 10 (unenhanced or venous) and size < 10 mm: Benign
/// 2. HU < 10 or size < 10 mm: Probably benign
/// 3. HU < 20 and size < 20 mm: Probably benign
/// 4. HU < 40 and size < 40 mm: Possibly malignant
/// 5. HU > 40 or size > 40 mm: Probably malignant
///
/// Missing readings never satisfy a condition. The label is independent
/// of the final conclusion and may disagree with it.
pub fn triage(
    non_contrast_hu: Option<f64>,
    venous_hu: Option<f64>,
    size_mm: Option<f64>,
) -> Option<TriageLabel> {
    let hu_below = |limit: f64| {
        non_contrast_hu.is_some_and(|hu| hu < limit) || venous_hu.is_some_and(|hu| hu < limit)
    };
    let hu_above = |limit: f64| {
        non_contrast_hu.is_some_and(|hu| hu > limit) || venous_hu.is_some_and(|hu| hu > limit)
    };
    let size_below = |limit: f64| size_mm.is_some_and(|size| size < limit);
    let size_above = |limit: f64| size_mm.is_some_and(|size| size > limit);

    if hu_below(10.0) && size_below(10.0) {
        Some(TriageLabel::Benign)
    } else if hu_below(10.0) || size_below(10.0) {
        Some(TriageLabel::ProbablyBenign)
    } else if hu_below(20.0) && size_below(20.0) {
        Some(TriageLabel::ProbablyBenign)
    } else if hu_below(40.0) && size_below(40.0) {
        Some(TriageLabel::PossiblyMalignant)
    } else if hu_above(40.0) || size_above(40.0) {
        Some(TriageLabel::ProbablyMalignant)
    } else {
        None
    }
}

/// Triage label for a full input record
pub fn triage_record(input: &InputRecord) -> Option<TriageLabel> {
    triage(input.non_contrast_hu(), input.venous_hu(), input.size_mm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(5.0), None, Some(8.0), Some(TriageLabel::Benign))]
    #[case(None, Some(5.0), Some(8.0), Some(TriageLabel::Benign))]
    #[case(Some(5.0), None, Some(30.0), Some(TriageLabel::ProbablyBenign))]
    #[case(None, None, Some(8.0), Some(TriageLabel::ProbablyBenign))]
    #[case(Some(15.0), None, Some(15.0), Some(TriageLabel::ProbablyBenign))]
    #[case(Some(30.0), Some(35.0), Some(30.0), Some(TriageLabel::PossiblyMalignant))]
    #[case(Some(45.0), None, Some(30.0), Some(TriageLabel::ProbablyMalignant))]
    #[case(Some(30.0), None, Some(45.0), Some(TriageLabel::ProbablyMalignant))]
    #[case(None, None, Some(45.0), Some(TriageLabel::ProbablyMalignant))]
    #[case(Some(40.0), None, Some(40.0), None)]
    #[case(None, None, Some(25.0), None)]
    #[case(None, None, None, None)]
    fn test_triage_ladder(
        #[case] nc: Option<f64>,
        #[case] venous: Option<f64>,
        #[case] size: Option<f64>,
        #[case] expected: Option<TriageLabel>,
    ) {
        assert_eq!(triage(nc, venous, size), expected);
    }

    #[test]
    fn test_either_reading_counts() {
        // Venous below 10 is enough even when unenhanced is high
        assert_eq!(
            triage(Some(50.0), Some(5.0), Some(5.0)),
            Some(TriageLabel::Benign)
        );
    }
}
