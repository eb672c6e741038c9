//! Form aggregator: one immutable [`PatientData`] snapshot per submission.
//!
//! Pure read of the current fields and selection store. Submission
//! preconditions (demographics, at least one symptom) belong to the caller.

use chrono::Local;
use uuid::Uuid;

use crate::models::enums::{FormField, ListCategory};
use crate::models::patient::{
    Demographics, Examination, History, Investigations, LabValues, PhysicalExam, Presentation,
    Vitals,
};
use crate::models::{FormFields, PatientData};
use crate::selection::SelectionStore;

pub fn collect(fields: &FormFields, store: &SelectionStore) -> PatientData {
    let text = |field: FormField| fields.get(field).trim().to_string();
    let list = |category: ListCategory| store.items(category).to_vec();

    PatientData {
        submission_id: Uuid::new_v4(),
        collected_at: Local::now().naive_local(),
        demographics: Demographics {
            age: text(FormField::Age),
            gender: text(FormField::Gender),
            ethnicity: text(FormField::Ethnicity),
            weight: text(FormField::Weight),
            height: text(FormField::Height),
            bmi: text(FormField::Bmi),
        },
        presentation: Presentation {
            chief_complaint: text(FormField::ChiefComplaint),
            symptoms: store.symptoms().to_vec(),
        },
        history: History {
            medical: list(ListCategory::MedicalHistory),
            surgical: list(ListCategory::SurgicalHistory),
            family: list(ListCategory::FamilyHistory),
            smoking: text(FormField::Smoking),
            alcohol: text(FormField::Alcohol),
            drugs: text(FormField::Drugs),
            allergies: list(ListCategory::Allergies),
        },
        examination: Examination {
            vitals: Vitals {
                blood_pressure: blood_pressure(
                    fields.get(FormField::SystolicBp),
                    fields.get(FormField::DiastolicBp),
                ),
                heart_rate: text(FormField::HeartRate),
                temperature: text(FormField::Temperature),
                respiratory_rate: text(FormField::RespiratoryRate),
                oxygen_saturation: text(FormField::OxygenSaturation),
            },
            physical: PhysicalExam {
                general: text(FormField::GeneralExam),
                heent: text(FormField::HeentExam),
                cardiovascular: text(FormField::CardiovascularExam),
                respiratory: text(FormField::RespiratoryExam),
                abdominal: text(FormField::AbdominalExam),
                neurological: text(FormField::NeurologicalExam),
            },
        },
        investigations: Investigations {
            labs: LabValues {
                hemoglobin: text(FormField::Hemoglobin),
                wbc: text(FormField::Wbc),
                platelets: text(FormField::Platelets),
                glucose: text(FormField::Glucose),
                creatinine: text(FormField::Creatinine),
                sodium: text(FormField::Sodium),
            },
            imaging: list(ListCategory::Imaging),
            diagnostics: list(ListCategory::Diagnostics),
        },
        medications: store.medications().to_vec(),
        notes: text(FormField::Notes),
    }
}

/// `systolic/diastolic`; empty when neither half was entered.
fn blood_pressure(systolic: &str, diastolic: &str) -> String {
    let (systolic, diastolic) = (systolic.trim(), diastolic.trim());
    if systolic.is_empty() && diastolic.is_empty() {
        String::new()
    } else {
        format!("{systolic}/{diastolic}")
    }
}
