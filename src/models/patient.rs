//! Submission snapshot: everything the clinician entered, nested by wizard
//! section. Built once per submit and never mutated afterwards.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::medication::Medication;
use super::symptom::Symptom;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    pub submission_id: Uuid,
    pub collected_at: NaiveDateTime,
    pub demographics: Demographics,
    pub presentation: Presentation,
    pub history: History,
    pub examination: Examination,
    pub investigations: Investigations,
    pub medications: Vec<Medication>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub age: String,
    pub gender: String,
    pub ethnicity: String,
    pub weight: String,
    pub height: String,
    pub bmi: String,
}

impl Demographics {
    /// Whole years from the leading digits, so "70.5" and "70 years" read
    /// as 70. `None` when the value does not start with a digit.
    pub fn age_years(&self) -> Option<u32> {
        let age = self.age.trim_start();
        let end = age
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(age.len());
        age[..end].parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub chief_complaint: String,
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub medical: Vec<String>,
    pub surgical: Vec<String>,
    pub family: Vec<String>,
    pub smoking: String,
    pub alcohol: String,
    pub drugs: String,
    pub allergies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Examination {
    pub vitals: Vitals,
    pub physical: PhysicalExam,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// `systolic/diastolic`, empty when neither was entered.
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub respiratory_rate: String,
    pub oxygen_saturation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalExam {
    pub general: String,
    pub heent: String,
    pub cardiovascular: String,
    pub respiratory: String,
    pub abdominal: String,
    pub neurological: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investigations {
    pub labs: LabValues,
    pub imaging: Vec<String>,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabValues {
    pub hemoglobin: String,
    pub wbc: String,
    pub platelets: String,
    pub glucose: String,
    pub creatinine: String,
    pub sodium: String,
}

impl LabValues {
    /// Entered values as `(label, value, unit)` in panel order.
    pub fn entered(&self) -> Vec<(&'static str, &str, &'static str)> {
        [
            ("Hemoglobin", self.hemoglobin.as_str(), "g/dL"),
            ("WBC", self.wbc.as_str(), "x10^9/L"),
            ("Platelets", self.platelets.as_str(), "x10^9/L"),
            ("Glucose", self.glucose.as_str(), "mg/dL"),
            ("Creatinine", self.creatinine.as_str(), "mg/dL"),
            ("Sodium", self.sodium.as_str(), "mmol/L"),
        ]
        .into_iter()
        .filter(|(_, value, _)| !value.trim().is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_years_parses_trimmed() {
        let demo = Demographics {
            age: " 70 ".into(),
            ..Default::default()
        };
        assert_eq!(demo.age_years(), Some(70));
        let demo = Demographics {
            age: "seventy".into(),
            ..Default::default()
        };
        assert_eq!(demo.age_years(), None);
    }

    #[test]
    fn age_years_reads_leading_digits() {
        for (raw, expected) in [
            ("70.5", Some(70)),
            ("70 years", Some(70)),
            ("", None),
            ("-5", None),
            ("abc70", None),
        ] {
            let demo = Demographics {
                age: raw.into(),
                ..Default::default()
            };
            assert_eq!(demo.age_years(), expected, "{raw}");
        }
    }

    #[test]
    fn entered_labs_skip_blank() {
        let labs = LabValues {
            hemoglobin: "13.5".into(),
            sodium: "140".into(),
            ..Default::default()
        };
        let entered = labs.entered();
        assert_eq!(entered.len(), 2);
        assert_eq!(entered[0], ("Hemoglobin", "13.5", "g/dL"));
        assert_eq!(entered[1], ("Sodium", "140", "mmol/L"));
    }
}
