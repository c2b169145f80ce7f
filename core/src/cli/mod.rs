pub mod export;
pub mod report;

use crate::form::AssessmentForm;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for adrenal
#[derive(Parser, Debug)]
#[command(name = "adrenal")]
#[command(about = "Adrenal mass assessment from CT findings")]
#[command(version)]
pub struct Cli {
    /// Patient age in years
    #[arg(long, default_value = "")]
    pub age: String,

    /// Mass size in mm (short axis)
    #[arg(short, long, value_name = "MM", default_value = "", allow_hyphen_values = true)]
    pub size: String,

    /// History of cancer
    #[arg(long)]
    pub history_of_cancer: bool,

    /// Reason of referral (cancer-workup, hormonal-imbalance, incidentaloma)
    #[arg(long, default_value = "")]
    pub referral: String,

    /// Non-contrast CT performed
    #[arg(long)]
    pub non_contrast_ct: bool,

    /// Contrast enhanced CT performed
    #[arg(long)]
    pub contrast_ct: bool,

    /// Non-contrast HU (implies --non-contrast-ct)
    #[arg(long, value_name = "HU", allow_hyphen_values = true)]
    pub non_contrast_hu: Option<String>,

    /// Venous phase HU (implies --contrast-ct)
    #[arg(long, value_name = "HU", allow_hyphen_values = true)]
    pub venous_hu: Option<String>,

    /// Delayed phase HU (implies --contrast-ct)
    #[arg(long, value_name = "HU", allow_hyphen_values = true)]
    pub delayed_hu: Option<String>,

    /// Mass development (no-prior-scan, grew-gt-5mm, grew-lt-5mm, in-doubt)
    #[arg(long, default_value = "no-prior-scan")]
    pub growth: String,

    /// Bilateral finding
    #[arg(long)]
    pub bilateral: bool,

    /// Heterogenicity (homogeneous, heterogeneous)
    #[arg(long, default_value = "")]
    pub heterogeneity: String,

    /// Sign of macroscopic fat (forced on by a negative HU reading)
    #[arg(long)]
    pub macroscopic_fat: bool,

    /// Cystic mass
    #[arg(long)]
    pub cystic: bool,

    /// Calcification
    #[arg(long)]
    pub calcification: bool,

    /// Enhancement cutoff in HU between unenhanced and venous phase
    #[arg(long, value_name = "HU", env = "ADRENAL_ENHANCEMENT_THRESHOLD", default_value_t = crate::types::DEFAULT_ENHANCEMENT_THRESHOLD_HU)]
    pub enhancement_threshold: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Save the final report as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

impl Cli {
    /// Builds the raw assessment form from the arguments
    ///
    /// Supplying a reading selects its modality.
    pub fn to_form(&self) -> AssessmentForm {
        let non_contrast_hu = self.non_contrast_hu.clone().unwrap_or_default();
        let venous_hu = self.venous_hu.clone().unwrap_or_default();
        let delayed_hu = self.delayed_hu.clone().unwrap_or_default();

        AssessmentForm {
            age: self.age.clone(),
            size_mm: self.size.clone(),
            history_of_cancer: self.history_of_cancer,
            referral_reason: self.referral.clone(),
            use_non_contrast_ct: self.non_contrast_ct || self.non_contrast_hu.is_some(),
            use_contrast_ct: self.contrast_ct
                || self.venous_hu.is_some()
                || self.delayed_hu.is_some(),
            non_contrast_hu,
            venous_hu,
            delayed_hu,
            growth_pattern: self.growth.clone(),
            bilateral: self.bilateral,
            heterogeneity: self.heterogeneity.clone(),
            macroscopic_fat: self.macroscopic_fat,
            cystic: self.cystic,
            calcification: self.calcification,
        }
    }
}
