/// Default enhancement cutoff between unenhanced and venous phase, in HU
pub const DEFAULT_ENHANCEMENT_THRESHOLD_HU: f64 = 10.0;

/// Default maximum phase-to-phase difference for the hematoma note, in HU
pub const DEFAULT_HEMATOMA_NOTE_DELTA_HU: f64 = 6.0;

/// Tunable thresholds used by the rule set
///
/// Historical versions of the rule set disagree on the enhancement cutoff
/// (6 HU vs 10 HU). The cutoff is kept here so either can be selected
/// without touching the rules.
///
/// # Example
///
/// ```
/// use adrenal_core::RuleConfig;
///
/// let config = RuleConfig::default().with_enhancement_threshold_hu(6.0);
/// assert_eq!(config.enhancement_threshold_hu, 6.0);
/// assert_eq!(config.hematoma_note_delta_hu, 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RuleConfig {
    /// Venous minus unenhanced HU above which the mass counts as enhancing.
    /// Also bounds the hematoma enhancement pattern.
    pub enhancement_threshold_hu: f64,

    /// Maximum |unenhanced - venous| and |unenhanced - delayed| for the
    /// "probably hematoma" complementary note
    pub hematoma_note_delta_hu: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enhancement_threshold_hu: DEFAULT_ENHANCEMENT_THRESHOLD_HU,
            hematoma_note_delta_hu: DEFAULT_HEMATOMA_NOTE_DELTA_HU,
        }
    }
}

impl RuleConfig {
    /// Builder: Set the enhancement threshold
    pub fn with_enhancement_threshold_hu(mut self, threshold: f64) -> Self {
        self.enhancement_threshold_hu = threshold;
        self
    }

    /// Builder: Set the hematoma note delta
    ///
    /// # Example
    ///
    /// ```
    /// use adrenal_core::RuleConfig;
    ///
    /// let config = RuleConfig::default().with_hematoma_note_delta_hu(10.0);
    /// assert_eq!(config.hematoma_note_delta_hu, 10.0);
    /// ```
    pub fn with_hematoma_note_delta_hu(mut self, delta: f64) -> Self {
        self.hematoma_note_delta_hu = delta;
        self
    }
}
