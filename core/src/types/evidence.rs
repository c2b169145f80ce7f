/// Benign and malignant supporting features of a mass
///
/// Both lists are append-only and keep rule-evaluation order. A mass may
/// present features from both sides at once; resolving the conflict is
/// left to the conclusion ladder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct EvidenceSet {
    pub benign_reasons: Vec<String>,
    pub malignant_reasons: Vec<String>,
}

impl EvidenceSet {
    /// Creates an empty evidence set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_benign(&mut self, reason: impl Into<String>) {
        self.benign_reasons.push(reason.into());
    }

    pub fn push_malignant(&mut self, reason: impl Into<String>) {
        self.malignant_reasons.push(reason.into());
    }

    /// Returns whether no feature on either side was found
    pub fn is_empty(&self) -> bool {
        self.benign_reasons.is_empty() && self.malignant_reasons.is_empty()
    }

    /// Comma-joined benign reasons
    pub fn benign_summary(&self) -> String {
        self.benign_reasons.join(", ")
    }

    /// Comma-joined malignant reasons
    pub fn malignant_summary(&self) -> String {
        self.malignant_reasons.join(", ")
    }
}
