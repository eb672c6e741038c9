use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// Duration recorded when the clinician leaves it blank.
pub const UNKNOWN_DURATION: &str = "unknown";

/// Input for adding a symptom from the manual entry row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub name: String,
    pub severity: Severity,
    /// Free text such as "3 days"; blank becomes `unknown`.
    #[serde(default)]
    pub duration: Option<String>,
}

/// A symptom held in the selection store. Unique by `name` (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub name: String,
    pub severity: Severity,
    pub duration: String,
}

impl Symptom {
    /// Build from manual entry: trims the name and defaults a blank duration.
    /// Returns `None` for a blank name.
    pub fn from_entry(entry: &SymptomEntry) -> Option<Self> {
        let name = entry.name.trim();
        if name.is_empty() {
            return None;
        }
        let duration = entry
            .duration
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DURATION);
        Some(Self {
            name: name.to_string(),
            severity: entry.severity,
            duration: duration.to_string(),
        })
    }

    /// Quick-tag shortcut: moderate severity, unknown duration.
    pub fn quick(name: &str) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::default(),
            duration: UNKNOWN_DURATION.to_string(),
        }
    }

    /// List label, e.g. `Cough (severe, 3 days)`.
    pub fn label(&self) -> String {
        format!("{} ({}, {})", self.name, self.severity, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, duration: Option<&str>) -> SymptomEntry {
        SymptomEntry {
            name: name.into(),
            severity: Severity::Severe,
            duration: duration.map(String::from),
        }
    }

    #[test]
    fn blank_duration_defaults_to_unknown() {
        let symptom = Symptom::from_entry(&entry("Cough", Some("   "))).unwrap();
        assert_eq!(symptom.duration, "unknown");
        let symptom = Symptom::from_entry(&entry("Cough", None)).unwrap();
        assert_eq!(symptom.duration, "unknown");
    }

    #[test]
    fn name_is_trimmed_and_required() {
        let symptom = Symptom::from_entry(&entry("  Fever ", Some("2 days"))).unwrap();
        assert_eq!(symptom.name, "Fever");
        assert_eq!(symptom.duration, "2 days");
        assert!(Symptom::from_entry(&entry("  ", None)).is_none());
    }

    #[test]
    fn quick_tag_is_moderate_unknown() {
        let symptom = Symptom::quick("Nausea");
        assert_eq!(symptom.severity, Severity::Moderate);
        assert_eq!(symptom.duration, "unknown");
    }

    #[test]
    fn label_shows_severity_and_duration() {
        let symptom = Symptom::from_entry(&entry("Cough", Some("3 days"))).unwrap();
        assert_eq!(symptom.label(), "Cough (severe, 3 days)");
    }
}
