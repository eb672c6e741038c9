use std::collections::HashSet;

use super::reference::KnowledgeBase;
use crate::models::DiagnosisRecord;

/// Rank candidate diagnoses for a set of symptom names.
///
/// Each bucket is checked independently: if any symptom name (case-folded)
/// equals one of its triggers, every record of the bucket is appended, once.
/// With no bucket triggered the result is the single fallback record. The
/// result is stably sorted by descending probability, so ties keep bucket
/// order. Never empty on a validated knowledge base.
///
/// Whole-bucket inclusion is coarse: one trigger pulls in unrelated records of
/// the same category. Revisit if category-level matching proves too noisy.
pub fn match_symptoms<S: AsRef<str>>(kb: &KnowledgeBase, symptom_names: &[S]) -> Vec<DiagnosisRecord> {
    let names: HashSet<String> = symptom_names
        .iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .collect();

    let mut results: Vec<DiagnosisRecord> = Vec::new();
    for bucket in &kb.buckets {
        if bucket.triggers.iter().any(|t| names.contains(t)) {
            tracing::debug!(category = %bucket.category, records = bucket.diagnoses.len(), "Category triggered");
            results.extend(bucket.diagnoses.iter().cloned());
        }
    }

    if results.is_empty() {
        if let Some(fallback) = kb.fallback_record() {
            tracing::debug!("No category triggered, using fallback record");
            results.push(fallback.clone());
        }
    }

    results.sort_by(|a, b| b.probability.cmp(&a.probability));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::bundled().unwrap()
    }

    fn conditions(results: &[DiagnosisRecord]) -> Vec<&str> {
        results.iter().map(|d| d.icd10.as_str()).collect()
    }

    fn is_non_increasing(results: &[DiagnosisRecord]) -> bool {
        results.windows(2).all(|w| w[0].probability >= w[1].probability)
    }

    #[test]
    fn single_trigger_words_produce_sorted_results() {
        let kb = kb();
        for name in ["cough", "dyspnea", "chest pain", "nausea"] {
            let results = match_symptoms(&kb, &[name]);
            assert!(!results.is_empty(), "{name}");
            assert!(is_non_increasing(&results), "{name}");
        }
    }

    #[test]
    fn empty_symptoms_return_only_fallback() {
        let results = match_symptoms::<&str>(&kb(), &[]);
        assert_eq!(conditions(&results), ["J06.9"]);
    }

    #[test]
    fn unmatched_symptoms_return_fallback() {
        let results = match_symptoms(&kb(), &["Headache", "Rash"]);
        assert_eq!(conditions(&results), ["J06.9"]);
    }

    #[test]
    fn trigger_pulls_in_whole_bucket() {
        let results = match_symptoms(&kb(), &["Cough"]);
        assert_eq!(conditions(&results), ["J44.1", "J06.9"]);
    }

    #[test]
    fn matching_is_case_insensitive_exact() {
        let results = match_symptoms(&kb(), &["CHEST PAIN"]);
        assert_eq!(conditions(&results), ["I20.9"]);
        // containment is not enough
        let results = match_symptoms(&kb(), &["severe chest pain"]);
        assert_eq!(conditions(&results), ["J06.9"]);
    }

    #[test]
    fn multiple_triggers_in_one_bucket_add_it_once() {
        let results = match_symptoms(&kb(), &["cough", "dyspnea", "shortness of breath"]);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn categories_merge_and_rank_by_probability() {
        let results = match_symptoms(&kb(), &["chest pain", "cough", "vomiting"]);
        assert_eq!(conditions(&results), ["J44.1", "I20.9", "K59.1", "J06.9"]);
        assert!(is_non_increasing(&results));
    }

    #[test]
    fn ties_keep_bucket_order() {
        let json = r#"{
            "fallback": { "category": "respiratory", "index": 0 },
            "buckets": [
                { "category": "respiratory", "triggers": ["cough"], "diagnoses": [
                    { "condition": "First", "icd10": "A1", "probability": 50, "confidence": 1,
                      "evidence_level": "C", "symptoms": [], "risk_factors": [],
                      "recommendations": [], "guidelines": "", "urgency": "low" }
                ]},
                { "category": "cardiovascular", "triggers": ["cough"], "diagnoses": [
                    { "condition": "Second", "icd10": "A2", "probability": 50, "confidence": 1,
                      "evidence_level": "C", "symptoms": [], "risk_factors": [],
                      "recommendations": [], "guidelines": "", "urgency": "low" }
                ]}
            ]
        }"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        let results = match_symptoms(&kb, &["cough"]);
        assert_eq!(conditions(&results), ["A1", "A2"]);
    }
}
