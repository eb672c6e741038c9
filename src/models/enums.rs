use crate::error::IntakeError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = IntakeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(IntakeError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = IntakeError;

            fn try_from(s: String) -> Result<Self, IntakeError> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

impl Default for Severity {
    /// Quick-tag symptoms are recorded as moderate.
    fn default() -> Self {
        Self::Moderate
    }
}

str_enum!(Urgency {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(EvidenceLevel {
    A => "A",
    B => "B",
    C => "C",
    D => "D",
});

str_enum!(DiagnosisCategory {
    Respiratory => "respiratory",
    Cardiovascular => "cardiovascular",
    Gastrointestinal => "gastrointestinal",
});

str_enum!(WizardStep {
    Demographics => "demographics",
    Presentation => "presentation",
    History => "history",
    Examination => "examination",
    Investigations => "investigations",
    Medications => "medications",
});

impl WizardStep {
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

str_enum!(ListCategory {
    MedicalHistory => "medical_history",
    SurgicalHistory => "surgical_history",
    FamilyHistory => "family_history",
    Allergies => "allergies",
    Imaging => "imaging",
    Diagnostics => "diagnostics",
});

str_enum!(Collection {
    Symptoms => "symptoms",
    MedicalHistory => "medical_history",
    SurgicalHistory => "surgical_history",
    FamilyHistory => "family_history",
    Allergies => "allergies",
    Imaging => "imaging",
    Diagnostics => "diagnostics",
    Medications => "medications",
});

impl From<ListCategory> for Collection {
    fn from(category: ListCategory) -> Self {
        match category {
            ListCategory::MedicalHistory => Self::MedicalHistory,
            ListCategory::SurgicalHistory => Self::SurgicalHistory,
            ListCategory::FamilyHistory => Self::FamilyHistory,
            ListCategory::Allergies => Self::Allergies,
            ListCategory::Imaging => Self::Imaging,
            ListCategory::Diagnostics => Self::Diagnostics,
        }
    }
}

impl Collection {
    /// The free-text category backing this collection, if it is one.
    pub fn list_category(&self) -> Option<ListCategory> {
        match self {
            Self::MedicalHistory => Some(ListCategory::MedicalHistory),
            Self::SurgicalHistory => Some(ListCategory::SurgicalHistory),
            Self::FamilyHistory => Some(ListCategory::FamilyHistory),
            Self::Allergies => Some(ListCategory::Allergies),
            Self::Imaging => Some(ListCategory::Imaging),
            Self::Diagnostics => Some(ListCategory::Diagnostics),
            Self::Symptoms | Self::Medications => None,
        }
    }
}

str_enum!(NotificationLevel {
    Success => "success",
    Warning => "warning",
    Error => "error",
    Info => "info",
});

str_enum!(FormField {
    Age => "age",
    Gender => "gender",
    Ethnicity => "ethnicity",
    Weight => "weight",
    Height => "height",
    Bmi => "bmi",
    ChiefComplaint => "chief_complaint",
    Smoking => "smoking",
    Alcohol => "alcohol",
    Drugs => "drugs",
    SystolicBp => "systolic_bp",
    DiastolicBp => "diastolic_bp",
    HeartRate => "heart_rate",
    Temperature => "temperature",
    RespiratoryRate => "respiratory_rate",
    OxygenSaturation => "oxygen_saturation",
    GeneralExam => "general_exam",
    HeentExam => "heent_exam",
    CardiovascularExam => "cardiovascular_exam",
    RespiratoryExam => "respiratory_exam",
    AbdominalExam => "abdominal_exam",
    NeurologicalExam => "neurological_exam",
    Hemoglobin => "hemoglobin",
    Wbc => "wbc",
    Platelets => "platelets",
    Glucose => "glucose",
    Creatinine => "creatinine",
    Sodium => "sodium",
    Notes => "notes",
});

impl FormField {
    /// Fields that hold long free text rather than a short value.
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            Self::ChiefComplaint
                | Self::GeneralExam
                | Self::HeentExam
                | Self::CardiovascularExam
                | Self::RespiratoryExam
                | Self::AbdominalExam
                | Self::NeurologicalExam
                | Self::Notes
        )
    }
}
