use super::{GrowthPattern, Heterogeneity, ReferralReason};

/// Validated findings for one adrenal mass
///
/// Built with consuming `with_*` methods. Fields are read through
/// accessors so that the macroscopic fat flag can never disagree with the
/// attenuation readings: a negative unenhanced or venous HU always forces
/// `macroscopic_fat()` to `true`, whatever order the builder is called in.
///
/// # Example
///
/// ```
/// use adrenal_core::{GrowthPattern, InputRecord};
///
/// let input = InputRecord::new()
///     .with_size_mm(25.0)
///     .with_non_contrast_hu(-15.0)
///     .with_growth_pattern(GrowthPattern::NoPriorScan)
///     .with_macroscopic_fat(false);
///
/// assert!(input.macroscopic_fat());
/// assert!(input.macroscopic_fat_forced());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InputRecord {
    age: Option<u32>,
    size_mm: Option<f64>,
    history_of_cancer: bool,
    referral_reason: ReferralReason,
    non_contrast_hu: Option<f64>,
    venous_hu: Option<f64>,
    delayed_hu: Option<f64>,
    growth_pattern: GrowthPattern,
    bilateral: bool,
    heterogeneity: Heterogeneity,
    macroscopic_fat: bool,
    #[cfg_attr(feature = "json", serde(skip))]
    reported_macroscopic_fat: bool,
    cystic: bool,
    calcification: bool,
}

impl InputRecord {
    /// Creates an empty record (no measurements, no flags)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Builder: Short-axis diameter in millimeters
    pub fn with_size_mm(mut self, size_mm: f64) -> Self {
        self.size_mm = Some(size_mm);
        self
    }

    pub fn with_history_of_cancer(mut self, history: bool) -> Self {
        self.history_of_cancer = history;
        self
    }

    pub fn with_referral_reason(mut self, reason: ReferralReason) -> Self {
        self.referral_reason = reason;
        self
    }

    /// Builder: Unenhanced attenuation in HU
    pub fn with_non_contrast_hu(mut self, hu: f64) -> Self {
        self.non_contrast_hu = Some(hu);
        self.sync_macroscopic_fat();
        self
    }

    /// Builder: Portal venous phase attenuation in HU
    pub fn with_venous_hu(mut self, hu: f64) -> Self {
        self.venous_hu = Some(hu);
        self.sync_macroscopic_fat();
        self
    }

    /// Builder: Delayed phase attenuation in HU
    pub fn with_delayed_hu(mut self, hu: f64) -> Self {
        self.delayed_hu = Some(hu);
        self
    }

    pub fn with_growth_pattern(mut self, pattern: GrowthPattern) -> Self {
        self.growth_pattern = pattern;
        self
    }

    pub fn with_bilateral(mut self, bilateral: bool) -> Self {
        self.bilateral = bilateral;
        self
    }

    pub fn with_heterogeneity(mut self, heterogeneity: Heterogeneity) -> Self {
        self.heterogeneity = heterogeneity;
        self
    }

    /// Builder: Reported sign of macroscopic fat
    ///
    /// Ignored when a negative attenuation reading is present.
    pub fn with_macroscopic_fat(mut self, fat: bool) -> Self {
        self.reported_macroscopic_fat = fat;
        self.sync_macroscopic_fat();
        self
    }

    pub fn with_cystic(mut self, cystic: bool) -> Self {
        self.cystic = cystic;
        self
    }

    pub fn with_calcification(mut self, calcification: bool) -> Self {
        self.calcification = calcification;
        self
    }

    fn sync_macroscopic_fat(&mut self) {
        self.macroscopic_fat = self.reported_macroscopic_fat || self.macroscopic_fat_forced();
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn size_mm(&self) -> Option<f64> {
        self.size_mm
    }

    pub fn history_of_cancer(&self) -> bool {
        self.history_of_cancer
    }

    pub fn referral_reason(&self) -> ReferralReason {
        self.referral_reason
    }

    pub fn non_contrast_hu(&self) -> Option<f64> {
        self.non_contrast_hu
    }

    pub fn venous_hu(&self) -> Option<f64> {
        self.venous_hu
    }

    pub fn delayed_hu(&self) -> Option<f64> {
        self.delayed_hu
    }

    pub fn growth_pattern(&self) -> GrowthPattern {
        self.growth_pattern
    }

    pub fn bilateral(&self) -> bool {
        self.bilateral
    }

    pub fn heterogeneity(&self) -> Heterogeneity {
        self.heterogeneity
    }

    /// Effective macroscopic fat flag
    pub fn macroscopic_fat(&self) -> bool {
        self.macroscopic_fat
    }

    /// Returns whether a negative reading forces the macroscopic fat flag
    pub fn macroscopic_fat_forced(&self) -> bool {
        self.non_contrast_hu.is_some_and(|hu| hu < 0.0) || self.venous_hu.is_some_and(|hu| hu < 0.0)
    }

    pub fn cystic(&self) -> bool {
        self.cystic
    }

    pub fn calcification(&self) -> bool {
        self.calcification
    }

    /// Venous minus unenhanced attenuation, when both were measured
    pub fn enhancement_hu(&self) -> Option<f64> {
        match (self.non_contrast_hu, self.venous_hu) {
            (Some(nc), Some(venous)) => Some(venous - nc),
            _ => None,
        }
    }

    /// Returns whether all three phases were measured
    pub fn has_all_phases(&self) -> bool {
        self.non_contrast_hu.is_some() && self.venous_hu.is_some() && self.delayed_hu.is_some()
    }

    /// Returns whether the mass shows the hematoma enhancement pattern
    ///
    /// Less than `threshold` HU enhancement with a venous reading above 20 HU.
    pub fn is_hematoma_pattern(&self, threshold: f64) -> bool {
        match (self.enhancement_hu(), self.venous_hu) {
            (Some(delta), Some(venous)) => delta < threshold && venous > 20.0,
            _ => false,
        }
    }

    /// Returns whether either unenhanced or venous reading satisfies `pred`
    pub fn any_attenuation(&self, pred: impl Fn(f64) -> bool) -> bool {
        self.non_contrast_hu.is_some_and(&pred) || self.venous_hu.is_some_and(&pred)
    }

    /// Returns whether the size is known and satisfies `pred`
    pub fn size_matches(&self, pred: impl Fn(f64) -> bool) -> bool {
        self.size_mm.is_some_and(pred)
    }
}
