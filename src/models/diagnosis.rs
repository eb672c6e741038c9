use serde::{Deserialize, Serialize};

use super::enums::{EvidenceLevel, Urgency};

/// A candidate diagnosis from the bundled knowledge base. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub condition: String,
    pub icd10: String,
    /// 0-100; the ranking key.
    pub probability: u8,
    /// 0-100
    pub confidence: u8,
    pub evidence_level: EvidenceLevel,
    pub symptoms: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub guidelines: String,
    pub urgency: Urgency,
}

impl DiagnosisRecord {
    /// Differential line, e.g. `Acute Coronary Syndrome (I20.9) - 75% probability`.
    pub fn differential_line(&self) -> String {
        format!(
            "{} ({}) - {}% probability",
            self.condition, self.icd10, self.probability
        )
    }
}
