//! Crate-wide error type.
//!
//! Validation variants render as the warning text shown to the user, so the
//! session can surface `err.to_string()` as a notification without mapping.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please complete required fields")]
    RequiredFieldsMissing,

    #[error("Please fill in all required demographic information")]
    MissingDemographics,

    #[error("Please add at least one symptom in the Chief Complaint section")]
    NoSymptoms,

    #[error("An analysis is already running for this patient")]
    AnalysisInProgress,

    #[error("Analysis cancelled")]
    AnalysisCancelled,

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal lock error")]
    LockPoisoned,
}

impl IntakeError {
    /// Whether this error is a user-facing validation failure (shown as a
    /// warning and leaves state intact) rather than an internal fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::RequiredFieldsMissing
                | Self::MissingDemographics
                | Self::NoSymptoms
                | Self::AnalysisInProgress
                | Self::InvalidInput(_)
        )
    }
}
