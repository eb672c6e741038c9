//! Selection store: the ordered, user-built lists behind the form.
//!
//! Insertion order is display order. Free-text lists and symptoms are
//! de-duplicated on exact match; medications are not. Removal by a stale
//! index is a silent no-op. Every method that changes a list reports it so
//! the caller can re-render exactly that list.

use serde::{Deserialize, Serialize};

use crate::models::enums::{Collection, ListCategory};
use crate::models::{Medication, MedicationEntry, Symptom, SymptomEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    symptoms: Vec<Symptom>,
    medical_history: Vec<String>,
    surgical_history: Vec<String>,
    family_history: Vec<String>,
    allergies: Vec<String>,
    imaging: Vec<String>,
    diagnostics: Vec<String>,
    medications: Vec<Medication>,
}

/// Snapshot of one collection, shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ListContents {
    Text(Vec<String>),
    Symptoms(Vec<Symptom>),
    Medications(Vec<Medication>),
}

impl ListContents {
    /// One display label per entry.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Text(items) => items.clone(),
            Self::Symptoms(items) => items.iter().map(Symptom::label).collect(),
            Self::Medications(items) => items.iter().map(Medication::label).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(items) => items.len(),
            Self::Symptoms(items) => items.len(),
            Self::Medications(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Free-text lists ─────────────────────────────────────

    pub fn items(&self, category: ListCategory) -> &[String] {
        match category {
            ListCategory::MedicalHistory => &self.medical_history,
            ListCategory::SurgicalHistory => &self.surgical_history,
            ListCategory::FamilyHistory => &self.family_history,
            ListCategory::Allergies => &self.allergies,
            ListCategory::Imaging => &self.imaging,
            ListCategory::Diagnostics => &self.diagnostics,
        }
    }

    fn items_mut(&mut self, category: ListCategory) -> &mut Vec<String> {
        match category {
            ListCategory::MedicalHistory => &mut self.medical_history,
            ListCategory::SurgicalHistory => &mut self.surgical_history,
            ListCategory::FamilyHistory => &mut self.family_history,
            ListCategory::Allergies => &mut self.allergies,
            ListCategory::Imaging => &mut self.imaging,
            ListCategory::Diagnostics => &mut self.diagnostics,
        }
    }

    /// Append a trimmed item unless it is blank or already present.
    /// Returns whether the list changed.
    pub fn add_item(&mut self, category: ListCategory, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() {
            return false;
        }
        let list = self.items_mut(category);
        if list.iter().any(|existing| existing == item) {
            return false;
        }
        list.push(item.to_string());
        true
    }

    // ── Symptoms ────────────────────────────────────────────

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Manual entry. No-op for a blank name or a name already present.
    pub fn add_symptom(&mut self, entry: &SymptomEntry) -> bool {
        match Symptom::from_entry(entry) {
            Some(symptom) => self.push_symptom(symptom),
            None => false,
        }
    }

    /// Quick-tag shortcut (moderate, unknown duration).
    pub fn add_quick_symptom(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.push_symptom(Symptom::quick(name))
    }

    fn push_symptom(&mut self, symptom: Symptom) -> bool {
        if self.has_symptom(&symptom.name) {
            return false;
        }
        self.symptoms.push(symptom);
        true
    }

    pub fn has_symptom(&self, name: &str) -> bool {
        self.symptoms.iter().any(|s| s.name == name)
    }

    // ── Medications ─────────────────────────────────────────

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// Always appends unless the name is blank.
    pub fn add_medication(&mut self, entry: &MedicationEntry) -> bool {
        match Medication::from_entry(entry) {
            Some(med) => {
                self.medications.push(med);
                true
            }
            None => false,
        }
    }

    // ── Removal / reset ─────────────────────────────────────

    /// Remove exactly one element. Out-of-range index is a no-op.
    pub fn remove(&mut self, collection: Collection, index: usize) -> bool {
        match collection {
            Collection::Symptoms => remove_at(&mut self.symptoms, index),
            Collection::Medications => remove_at(&mut self.medications, index),
            other => match other.list_category() {
                Some(category) => remove_at(self.items_mut(category), index),
                None => false,
            },
        }
    }

    /// Empty every collection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Symptoms => self.symptoms.len(),
            Collection::Medications => self.medications.len(),
            other => other
                .list_category()
                .map(|category| self.items(category).len())
                .unwrap_or(0),
        }
    }

    /// Owned snapshot of one collection for rendering.
    pub fn contents(&self, collection: Collection) -> ListContents {
        match collection {
            Collection::Symptoms => ListContents::Symptoms(self.symptoms.clone()),
            Collection::Medications => ListContents::Medications(self.medications.clone()),
            other => ListContents::Text(
                other
                    .list_category()
                    .map(|category| self.items(category).to_vec())
                    .unwrap_or_default(),
            ),
        }
    }
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) -> bool {
    if index >= list.len() {
        return false;
    }
    list.remove(index);
    true
}
