use crate::error::Result;
use std::fmt;

/// Reason the patient was referred for imaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum ReferralReason {
    CancerWorkup,
    HormonalImbalance,
    Incidentaloma,
    #[default]
    Unspecified,
}

impl ReferralReason {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ReferralReason::CancerWorkup => "Cancer work-up",
            ReferralReason::HormonalImbalance => "Hormonal imbalance",
            ReferralReason::Incidentaloma => "Incidentaloma",
            ReferralReason::Unspecified => "",
        }
    }

    /// Risk of malignancy attributed to the referral reason, in percent
    pub fn malignancy_risk_pct(&self) -> Option<u32> {
        match self {
            ReferralReason::CancerWorkup => Some(43),
            ReferralReason::HormonalImbalance | ReferralReason::Incidentaloma => Some(3),
            ReferralReason::Unspecified => None,
        }
    }

    /// Parses referral reason from string
    ///
    /// Accepts display labels ("Cancer work-up") as well as
    /// snake/kebab case names. Anything else is `Unspecified`, which only
    /// drops the referral risk note. Growth has no neutral value, so
    /// [`GrowthPattern::parse`] rejects unknown text instead.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let s_lower = normalize(s);
        if s_lower.contains("cancer") {
            ReferralReason::CancerWorkup
        } else if s_lower.contains("hormon") {
            ReferralReason::HormonalImbalance
        } else if s_lower.contains("incidental") {
            ReferralReason::Incidentaloma
        } else {
            ReferralReason::Unspecified
        }
    }
}

impl fmt::Display for ReferralReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Growth of the mass relative to prior imaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum GrowthPattern {
    #[default]
    NoPriorScan,
    GrewGt5mmPerYear,
    GrewLt5mmPerYear,
    InDoubt,
}

impl GrowthPattern {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            GrowthPattern::NoPriorScan => "No prior scanning",
            GrowthPattern::GrewGt5mmPerYear => "Increased >5 mm/year",
            GrowthPattern::GrewLt5mmPerYear => "Increased <5 mm/year",
            GrowthPattern::InDoubt => "In doubt",
        }
    }

    /// Returns whether the pattern counts as no significant growth
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            GrowthPattern::NoPriorScan | GrowthPattern::GrewLt5mmPerYear
        )
    }

    /// Returns whether growth is fast or cannot be ruled out
    pub fn is_suspicious(&self) -> bool {
        matches!(self, GrowthPattern::GrewGt5mmPerYear | GrowthPattern::InDoubt)
    }

    /// Parses growth pattern from string
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the string names no known pattern
    pub fn parse(s: &str) -> Result<Self> {
        let s_lower = normalize(s);
        if s_lower.contains("prior") {
            Ok(GrowthPattern::NoPriorScan)
        } else if s_lower.contains("doubt") {
            Ok(GrowthPattern::InDoubt)
        } else if s_lower.contains('>') || s_lower.contains("gt") {
            Ok(GrowthPattern::GrewGt5mmPerYear)
        } else if s_lower.contains('<') || s_lower.contains("lt") {
            Ok(GrowthPattern::GrewLt5mmPerYear)
        } else {
            Err(format!("unknown growth pattern '{}'", s).into())
        }
    }
}

impl fmt::Display for GrowthPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Internal texture of the mass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum Heterogeneity {
    #[default]
    Unspecified,
    Homogeneous,
    Heterogeneous,
}

impl Heterogeneity {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Heterogeneity::Unspecified => "",
            Heterogeneity::Homogeneous => "Homogen",
            Heterogeneity::Heterogeneous => "Heterogen",
        }
    }

    /// Parses heterogeneity from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let s_lower = normalize(s);
        if s_lower.starts_with("hetero") {
            Heterogeneity::Heterogeneous
        } else if s_lower.starts_with("homo") {
            Heterogeneity::Homogeneous
        } else {
            Heterogeneity::Unspecified
        }
    }
}

impl fmt::Display for Heterogeneity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Coarse triage label derived from density and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum TriageLabel {
    Benign,
    ProbablyBenign,
    PossiblyMalignant,
    ProbablyMalignant,
}

impl TriageLabel {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            TriageLabel::Benign => "Benign",
            TriageLabel::ProbablyBenign => "Probably benign",
            TriageLabel::PossiblyMalignant => "Possibly malignant",
            TriageLabel::ProbablyMalignant => "Probably malignant",
        }
    }

    /// Returns the display color of the label
    pub fn color(&self) -> &'static str {
        if self.is_benign() {
            "green"
        } else {
            "red"
        }
    }

    /// Returns whether the label leans benign
    pub fn is_benign(&self) -> bool {
        matches!(self, TriageLabel::Benign | TriageLabel::ProbablyBenign)
    }
}

impl fmt::Display for TriageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', '-'], " ")
}
