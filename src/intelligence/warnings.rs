//! Clinical decision-support warnings raised from a collected submission.

use crate::models::PatientData;

const ELDERLY_AGE_YEARS: u32 = 65;

pub const ELDERLY_CHEST_PAIN: &str = "Consider ACS workup in elderly patient with chest pain";
pub const WARFARIN_ASPIRIN: &str =
    "Warning: Increased bleeding risk with warfarin + aspirin combination";

/// Warnings in a fixed order: age-based first, then drug interactions.
pub fn clinical_warnings(patient: &PatientData) -> Vec<String> {
    let mut warnings = Vec::new();

    let elderly = patient
        .demographics
        .age_years()
        .is_some_and(|age| age > ELDERLY_AGE_YEARS);
    let chest_pain = patient
        .presentation
        .symptoms
        .iter()
        .any(|s| s.name.to_lowercase().contains("chest pain"));
    if elderly && chest_pain {
        warnings.push(ELDERLY_CHEST_PAIN.to_string());
    }

    let meds: Vec<String> = patient
        .medications
        .iter()
        .map(|m| m.name.to_lowercase())
        .collect();
    if meds.iter().any(|m| m == "warfarin") && meds.iter().any(|m| m == "aspirin") {
        warnings.push(WARFARIN_ASPIRIN.to_string());
    }

    warnings
}
