//! Clinical note generator: SOAP-style text report from a submission and its
//! ranked differential (template-based, no inference).
//!
//! Only the `Generated:` and `Date:` lines depend on the clock; everything
//! else is a pure function of the inputs. Empty fields render the fixed
//! placeholders below, which downstream readers rely on.

use chrono::{Local, NaiveDateTime};

use crate::models::{DiagnosisRecord, PatientData};

pub const NOT_DOCUMENTED: &str = "Not documented";
pub const NONE_DOCUMENTED: &str = "None documented";
pub const NO_KNOWN_ALLERGIES: &str = "NKDA";
pub const NOT_TAKEN: &str = "Not taken";
pub const NO_PLAN: &str = "Plan to be determined";
pub const NO_NOTES: &str = "None";

pub const DISCLAIMER: &str = "DISCLAIMER: This assessment was generated with AI assistance and requires physician review and approval.";

const TITLE: &str = "CLINICAL ASSESSMENT REPORT";
const PROVIDER_LINE: &str = "Provider: Dr. [Provider Name]";
const PATIENT_ID_LINE: &str = "Patient ID: [Patient ID]";
const SIGNATURE_LINE: &str = "Provider Signature: _______________________";

/// Render the note stamped with the current local time.
pub fn generate(patient: &PatientData, diagnoses: &[DiagnosisRecord]) -> String {
    generate_at(patient, diagnoses, Local::now().naive_local())
}

/// Render the note with an explicit timestamp.
pub fn generate_at(
    patient: &PatientData,
    diagnoses: &[DiagnosisRecord],
    at: NaiveDateTime,
) -> String {
    let date = at.format("%Y-%m-%d").to_string();
    let time = at.format("%H:%M:%S").to_string();
    let demo = &patient.demographics;
    let history = &patient.history;
    let vitals = &patient.examination.vitals;
    let physical = &patient.examination.physical;

    let mut lines: Vec<String> = vec![
        TITLE.into(),
        format!("Generated: {date} {time}"),
        PROVIDER_LINE.into(),
        PATIENT_ID_LINE.into(),
        String::new(),
        "DEMOGRAPHICS:".into(),
        format!("Age: {} years", demo.age),
        format!("Gender: {}", demo.gender),
    ];
    if !demo.ethnicity.is_empty() {
        lines.push(format!("Ethnicity: {}", demo.ethnicity));
    }
    if !demo.bmi.is_empty() {
        lines.push(format!("BMI: {}", demo.bmi));
    }

    // ── Subjective ──
    lines.push(String::new());
    lines.push("SUBJECTIVE:".into());
    lines.push(format!(
        "Chief Complaint: {}",
        or(&patient.presentation.chief_complaint, NOT_DOCUMENTED)
    ));
    lines.push(String::new());
    lines.push("History of Present Illness:".into());
    if patient.presentation.symptoms.is_empty() {
        lines.push(NONE_DOCUMENTED.into());
    }
    for s in &patient.presentation.symptoms {
        lines.push(format!("- {} ({}, duration: {})", s.name, s.severity, s.duration));
    }
    lines.push(String::new());
    lines.push(format!("Past Medical History: {}", joined(&history.medical, NONE_DOCUMENTED)));
    lines.push(format!("Surgical History: {}", joined(&history.surgical, NONE_DOCUMENTED)));
    lines.push(format!("Family History: {}", joined(&history.family, NONE_DOCUMENTED)));
    lines.push("Social History:".into());
    lines.push(format!("  Smoking: {}", or(&history.smoking, NOT_DOCUMENTED)));
    lines.push(format!("  Alcohol: {}", or(&history.alcohol, NOT_DOCUMENTED)));
    lines.push(format!("  Drugs: {}", or(&history.drugs, NOT_DOCUMENTED)));
    lines.push(format!("Allergies: {}", joined(&history.allergies, NO_KNOWN_ALLERGIES)));
    lines.push(String::new());
    lines.push("Current Medications:".into());
    if patient.medications.is_empty() {
        lines.push(NONE_DOCUMENTED.into());
    }
    for m in &patient.medications {
        lines.push(format!("- {}", m.label()));
    }

    // ── Objective ──
    lines.push(String::new());
    lines.push("OBJECTIVE:".into());
    lines.push("Vital Signs:".into());
    lines.push(format!("  Blood Pressure: {}", measured(&vitals.blood_pressure, " mmHg")));
    lines.push(format!("  Heart Rate: {}", measured(&vitals.heart_rate, " bpm")));
    lines.push(format!("  Temperature: {}", measured(&vitals.temperature, " °C")));
    lines.push(format!("  Respiratory Rate: {}", measured(&vitals.respiratory_rate, " /min")));
    lines.push(format!("  O2 Saturation: {}", measured(&vitals.oxygen_saturation, "%")));
    lines.push(String::new());
    lines.push("Physical Examination:".into());
    for (label, value) in [
        ("General", &physical.general),
        ("HEENT", &physical.heent),
        ("Cardiovascular", &physical.cardiovascular),
        ("Respiratory", &physical.respiratory),
        ("Abdominal", &physical.abdominal),
        ("Neurological", &physical.neurological),
    ] {
        lines.push(format!("  {label}: {}", or(value, NOT_DOCUMENTED)));
    }
    lines.push(String::new());
    lines.push("Laboratory/Diagnostic Results:".into());
    let investigations = &patient.investigations;
    let mut results: Vec<String> = investigations
        .labs
        .entered()
        .into_iter()
        .map(|(label, value, unit)| format!("  {label}: {value} {unit}"))
        .collect();
    results.extend(investigations.imaging.iter().cloned());
    results.extend(investigations.diagnostics.iter().cloned());
    if results.is_empty() {
        lines.push(NONE_DOCUMENTED.into());
    }
    lines.extend(results);

    // ── Assessment / Plan ──
    lines.push(String::new());
    lines.push("ASSESSMENT:".into());
    lines.push("Differential Diagnosis:".into());
    for (rank, d) in diagnoses.iter().enumerate() {
        lines.push(format!("{}. {}", rank + 1, d.differential_line()));
    }
    lines.push(String::new());
    lines.push("PLAN:".into());
    match diagnoses.first() {
        Some(top) => {
            for (i, rec) in top.recommendations.iter().enumerate() {
                lines.push(format!("{}. {rec}", i + 1));
            }
        }
        None => lines.push(NO_PLAN.into()),
    }
    lines.push(String::new());
    lines.push(format!("Additional Notes: {}", or(&patient.notes, NO_NOTES)));
    lines.push(String::new());
    lines.push(SIGNATURE_LINE.into());
    lines.push(format!("Date: {date}"));
    lines.push(String::new());
    lines.push(DISCLAIMER.into());

    lines.join("\n")
}

fn or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn joined(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

fn measured(value: &str, unit: &str) -> String {
    if value.trim().is_empty() {
        NOT_TAKEN.to_string()
    } else {
        format!("{value}{unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::collect;
    use crate::intelligence::{match_symptoms, KnowledgeBase};
    use crate::models::enums::{FormField, ListCategory, Severity};
    use crate::models::{FormFields, MedicationEntry, SymptomEntry};
    use crate::selection::SelectionStore;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn cough_only() -> PatientData {
        let mut fields = FormFields::new();
        fields.set(FormField::Age, "34");
        fields.set(FormField::Gender, "female");
        let mut store = SelectionStore::new();
        store.add_symptom(&SymptomEntry {
            name: "Cough".into(),
            severity: Severity::Severe,
            duration: Some("3 days".into()),
        });
        collect(&fields, &store)
    }

    fn note_for(patient: &PatientData) -> String {
        let kb = KnowledgeBase::bundled().unwrap();
        let names: Vec<&str> = patient
            .presentation
            .symptoms
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        generate_at(patient, &match_symptoms(&kb, &names), stamp())
    }

    #[test]
    fn symptom_line_and_allergy_placeholder() {
        let note = note_for(&cough_only());
        assert!(note.lines().any(|l| l == "- Cough (severe, duration: 3 days)"));
        assert!(note.contains("Allergies: NKDA"));
    }

    #[test]
    fn empty_fields_render_placeholders() {
        let note = note_for(&cough_only());
        assert!(note.contains("Chief Complaint: Not documented"));
        assert!(note.contains("Past Medical History: None documented"));
        assert!(note.contains("  Smoking: Not documented"));
        assert!(note.contains("  Blood Pressure: Not taken"));
        assert!(note.contains("  O2 Saturation: Not taken"));
        assert!(note.contains("  Neurological: Not documented"));
        assert!(note.contains("Additional Notes: None"));
        assert!(!note.contains("Ethnicity:"));
        assert!(!note.contains("BMI:"));
    }

    #[test]
    fn header_and_footer_are_stamped() {
        let note = note_for(&cough_only());
        let lines: Vec<&str> = note.lines().collect();
        assert_eq!(lines[0], "CLINICAL ASSESSMENT REPORT");
        assert_eq!(lines[1], "Generated: 2026-03-14 09:30:00");
        assert!(note.contains("\nDate: 2026-03-14\n"));
        assert_eq!(*lines.last().unwrap(), DISCLAIMER);
    }

    #[test]
    fn differential_and_plan_follow_ranking() {
        let note = note_for(&cough_only());
        assert!(note.contains(
            "Differential Diagnosis:\n1. Community-Acquired Pneumonia (J44.1) - 85% probability\n2. Upper Respiratory Tract Infection (J06.9) - 65% probability\n"
        ));
        assert!(note.contains("PLAN:\n1. Chest X-ray to confirm diagnosis\n2. Blood cultures and sputum culture\n"));
    }

    #[test]
    fn no_diagnoses_means_plan_tbd() {
        let note = generate_at(&cough_only(), &[], stamp());
        assert!(note.contains("PLAN:\nPlan to be determined"));
    }

    #[test]
    fn filled_sections_render_values() {
        let mut fields = FormFields::new();
        fields.set(FormField::Age, "61");
        fields.set(FormField::Gender, "male");
        fields.set(FormField::Ethnicity, "Hispanic");
        fields.set(FormField::Weight, "80");
        fields.set(FormField::Height, "170");
        fields.set(FormField::SystolicBp, "150");
        fields.set(FormField::DiastolicBp, "95");
        fields.set(FormField::HeartRate, "102");
        fields.set(FormField::Temperature, "37.2");
        fields.set(FormField::OxygenSaturation, "96");
        fields.set(FormField::Hemoglobin, "13.1");
        let mut store = SelectionStore::new();
        store.add_quick_symptom("Chest pain");
        store.add_item(ListCategory::Allergies, "Penicillin");
        store.add_item(ListCategory::Allergies, "Latex");
        store.add_item(ListCategory::Diagnostics, "ECG: ST depression V4-V6");
        store.add_medication(&MedicationEntry {
            name: "Metformin".into(),
            dose: "500mg".into(),
            frequency: "BID".into(),
        });
        let note = note_for(&collect(&fields, &store));

        assert!(note.contains("Ethnicity: Hispanic\nBMI: 27.7\n"));
        assert!(note.contains("- Chest pain (moderate, duration: unknown)"));
        assert!(note.contains("Allergies: Penicillin, Latex"));
        assert!(note.contains("Current Medications:\n- Metformin 500mg BID\n"));
        assert!(note.contains("  Blood Pressure: 150/95 mmHg"));
        assert!(note.contains("  Heart Rate: 102 bpm"));
        assert!(note.contains("  Temperature: 37.2 °C"));
        assert!(note.contains("  O2 Saturation: 96%"));
        assert!(note.contains(
            "Laboratory/Diagnostic Results:\n  Hemoglobin: 13.1 g/dL\nECG: ST depression V4-V6\n"
        ));
        assert!(note.contains("1. Acute Coronary Syndrome (I20.9) - 75% probability"));
        assert!(note.contains("PLAN:\n1. Immediate 12-lead ECG\n"));
    }

    #[test]
    fn output_stable_apart_from_timestamp() {
        let patient = cough_only();
        let kb = KnowledgeBase::bundled().unwrap();
        let diagnoses = match_symptoms(&kb, &["Cough"]);
        let strip = |note: String| -> Vec<String> {
            note.lines()
                .filter(|l| !l.starts_with("Generated:") && !l.starts_with("Date:"))
                .map(String::from)
                .collect()
        };
        assert_eq!(
            strip(generate(&patient, &diagnoses)),
            strip(generate_at(&patient, &diagnoses, stamp()))
        );
    }
}
