pub mod diagnosis;
pub mod enums;
pub mod fields;
pub mod medication;
pub mod patient;
pub mod symptom;

pub use diagnosis::DiagnosisRecord;
pub use fields::FormFields;
pub use medication::{Medication, MedicationEntry};
pub use patient::PatientData;
pub use symptom::{Symptom, SymptomEntry};
