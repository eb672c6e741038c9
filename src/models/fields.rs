//! Raw form inputs as last reported by the UI host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::FormField;

/// Current value of every scalar input on the form. Unset fields read as "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    values: BTreeMap<FormField, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Whether the field holds something other than whitespace.
    pub fn is_filled(&self, field: FormField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Store a value. Setting weight or height recomputes BMI; the new BMI is
    /// returned so the caller can push it to the UI.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> Option<String> {
        self.values.insert(field, value.into());
        match field {
            FormField::Weight | FormField::Height => {
                let bmi = compute_bmi(self.get(FormField::Weight), self.get(FormField::Height))?;
                self.values.insert(FormField::Bmi, bmi.clone());
                Some(bmi)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

/// BMI from weight (kg) and height (cm), one decimal place. `None` unless
/// both parse as positive numbers.
pub fn compute_bmi(weight_kg: &str, height_cm: &str) -> Option<String> {
    let weight: f64 = weight_kg.trim().parse().ok()?;
    let height: f64 = height_cm.trim().parse().ok()?;
    if weight <= 0.0 || height <= 0.0 || !weight.is_finite() || !height.is_finite() {
        return None;
    }
    let meters = height / 100.0;
    Some(format!("{:.1}", weight / (meters * meters)))
}
