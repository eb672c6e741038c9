//! Bundled diagnosis knowledge base.
//!
//! Category buckets with their trigger keywords and candidate diagnoses,
//! loaded from `resources/diagnoses.json` (embedded at compile time).

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::models::enums::DiagnosisCategory;
use crate::models::DiagnosisRecord;

const BUNDLED_DIAGNOSES: &str = include_str!("../../resources/diagnoses.json");

/// One category: the symptom names that activate it and every record it
/// contributes when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: DiagnosisCategory,
    /// Lowercase symptom names.
    pub triggers: Vec<String>,
    pub diagnoses: Vec<DiagnosisRecord>,
}

/// Points at the catch-all record used when no bucket triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRef {
    pub category: DiagnosisCategory,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub buckets: Vec<CategoryBucket>,
    pub fallback: FallbackRef,
}

impl KnowledgeBase {
    /// The knowledge base shipped with the crate.
    pub fn bundled() -> Result<Self, IntakeError> {
        Self::from_json(BUNDLED_DIAGNOSES)
    }

    /// Parse and validate a knowledge base. Trigger keywords are folded to
    /// lowercase so matching only has to fold the symptom side.
    pub fn from_json(json: &str) -> Result<Self, IntakeError> {
        let mut kb: KnowledgeBase = serde_json::from_str(json)
            .map_err(|e| IntakeError::ReferenceData(format!("diagnoses.json: {e}")))?;
        for bucket in &mut kb.buckets {
            for trigger in &mut bucket.triggers {
                *trigger = trigger.trim().to_lowercase();
            }
        }
        kb.validate()?;
        tracing::debug!(
            buckets = kb.buckets.len(),
            records = kb.buckets.iter().map(|b| b.diagnoses.len()).sum::<usize>(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    fn validate(&self) -> Result<(), IntakeError> {
        if self.buckets.is_empty() {
            return Err(IntakeError::ReferenceData("no category buckets".into()));
        }
        for bucket in &self.buckets {
            if bucket.triggers.iter().any(|t| t.is_empty()) {
                return Err(IntakeError::ReferenceData(format!(
                    "{}: empty trigger keyword",
                    bucket.category
                )));
            }
            for record in &bucket.diagnoses {
                if record.probability > 100 || record.confidence > 100 {
                    return Err(IntakeError::ReferenceData(format!(
                        "{}: {} out of 0-100 range",
                        bucket.category, record.icd10
                    )));
                }
            }
        }
        if self.fallback_record().is_none() {
            return Err(IntakeError::ReferenceData(format!(
                "fallback {}[{}] does not exist",
                self.fallback.category, self.fallback.index
            )));
        }
        Ok(())
    }

    pub fn bucket(&self, category: DiagnosisCategory) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }

    /// The catch-all record. Always present on a validated knowledge base.
    pub fn fallback_record(&self) -> Option<&DiagnosisRecord> {
        self.bucket(self.fallback.category)?
            .diagnoses
            .get(self.fallback.index)
    }
}
