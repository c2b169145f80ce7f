//! CSV export of one assessment
//!
//! One header row and one data row: the inputs as entered plus the final
//! conclusion.

use crate::api::Assessment;
use crate::error::{AdrenalError, Result};
use crate::form::AssessmentForm;
use crate::types::InputRecord;
use std::fs;
use std::path::Path;

/// Column headers of the exported report
pub const CSV_COLUMNS: [&str; 16] = [
    "Age",
    "Mass Size (mm)",
    "History of Cancer",
    "Reason of Referral",
    "Non-contrast CT Used",
    "Contrast Enhanced CT Used",
    "Non-contrast HU",
    "Venous phase HU",
    "Delayed HU",
    "Mass Development",
    "Bilateral Finding",
    "Heterogenicity",
    "Macroscopic Fat",
    "Cystic",
    "Calcification",
    "Final Conclusion",
];

/// Renders the report as CSV text
///
/// Macroscopic fat is exported as evaluated, so a negative HU reading
/// shows up as `True` even when the box was left unticked.
pub fn csv_report(form: &AssessmentForm, record: &InputRecord, assessment: &Assessment) -> String {
    let row = [
        form.age.clone(),
        form.size_mm.clone(),
        py_bool(form.history_of_cancer),
        record.referral_reason().simple_name().to_string(),
        py_bool(form.use_non_contrast_ct),
        py_bool(form.use_contrast_ct),
        form.non_contrast_hu.clone(),
        form.venous_hu.clone(),
        form.delayed_hu.clone(),
        record.growth_pattern().simple_name().to_string(),
        py_bool(form.bilateral),
        record.heterogeneity().simple_name().to_string(),
        py_bool(record.macroscopic_fat()),
        py_bool(form.cystic),
        py_bool(form.calcification),
        assessment.final_conclusion.clone(),
    ];

    let header: Vec<String> = CSV_COLUMNS.iter().map(|c| escape_field(c)).collect();
    let values: Vec<String> = row.iter().map(|v| escape_field(v)).collect();
    format!("{}\n{}\n", header.join(","), values.join(","))
}

/// Writes the CSV report to `path`
///
/// # Errors
///
/// Returns `MissingRequiredInput` when there is no conclusion to export,
/// or an I/O error if the file cannot be written.
pub fn write_csv_report(
    path: &Path,
    form: &AssessmentForm,
    record: &InputRecord,
    assessment: &Assessment,
) -> Result<()> {
    if !assessment.has_conclusion() {
        return Err(AdrenalError::MissingRequiredInput(
            "no final conclusion to export".to_string(),
        ));
    }
    fs::write(path, csv_report(form, record, assessment))?;
    Ok(())
}

fn py_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Quotes a field when it contains a separator, quote or line break
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
