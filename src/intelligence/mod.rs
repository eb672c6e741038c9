//! Symptom-driven differential lookup and decision-support warnings.

pub mod matcher;
pub mod reference;
pub mod warnings;

pub use matcher::match_symptoms;
pub use reference::{CategoryBucket, FallbackRef, KnowledgeBase};
pub use warnings::clinical_warnings;
