use serde::{Deserialize, Serialize};

/// Dose or frequency recorded when left blank.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Input for the medication entry row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub frequency: String,
}

/// A current medication. No uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dose: String,
    pub frequency: String,
}

impl Medication {
    /// Returns `None` when the name is blank.
    pub fn from_entry(entry: &MedicationEntry) -> Option<Self> {
        let name = entry.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            dose: or_unknown(&entry.dose),
            frequency: or_unknown(&entry.frequency),
        })
    }

    /// List and note label: `name dose frequency`.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.name, self.dose, self.frequency)
    }
}

fn or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_VALUE.to_string()
    } else {
        trimmed.to_string()
    }
}
