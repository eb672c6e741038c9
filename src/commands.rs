//! Host-facing command surface.
//!
//! The UI host sends one JSON action per user interaction. Each action is
//! validated (length limits, enum values), applied to the session, and any
//! error comes back as a display string.

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::models::enums::{Collection, FormField, ListCategory, Severity};
use crate::models::{MedicationEntry, SymptomEntry};
use crate::session::{AnalysisReport, IntakeSession};

/// Longest accepted symptom, item or medication name.
pub const MAX_NAME_LEN: usize = 200;
/// Longest accepted free-text field value.
pub const MAX_TEXT_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    AddSymptom {
        name: String,
        #[serde(default)]
        severity: Severity,
        #[serde(default)]
        duration: Option<String>,
    },
    AddQuickSymptom {
        name: String,
    },
    AddItem {
        category: ListCategory,
        item: String,
    },
    AddMedication {
        name: String,
        #[serde(default)]
        dose: String,
        #[serde(default)]
        frequency: String,
    },
    RemoveItem {
        collection: Collection,
        index: usize,
    },
    SetField {
        field: FormField,
        value: String,
    },
    Navigate {
        to: NavTarget,
    },
    Submit,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavTarget {
    Next,
    Prev,
    /// Tab click: forward by at most one step, no validation.
    Tab { index: i64 },
    /// Programmatic jump.
    Step { index: i64 },
}

pub fn parse_action(json: &str) -> Result<UiAction, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid action: {e}"))
}

/// Apply one action. `Submit` resolves with the report after the analysis
/// delay; every other action resolves to `None`.
pub async fn dispatch(
    session: &IntakeSession,
    action: UiAction,
) -> Result<Option<AnalysisReport>, String> {
    validate_action(&action).map_err(|e| e.to_string())?;

    let outcome = match action {
        UiAction::AddSymptom {
            name,
            severity,
            duration,
        } => session
            .add_symptom(&SymptomEntry {
                name,
                severity,
                duration,
            })
            .map(|_| None),
        UiAction::AddQuickSymptom { name } => session.add_quick_symptom(&name).map(|_| None),
        UiAction::AddItem { category, item } => session.add_item(category, &item).map(|_| None),
        UiAction::AddMedication {
            name,
            dose,
            frequency,
        } => session
            .add_medication(&MedicationEntry {
                name,
                dose,
                frequency,
            })
            .map(|_| None),
        UiAction::RemoveItem { collection, index } => {
            session.remove(collection, index).map(|_| None)
        }
        UiAction::SetField { field, value } => session.set_field(field, &value).map(|_| None),
        UiAction::Navigate { to } => match to {
            NavTarget::Next => session.next().map(|_| None),
            NavTarget::Prev => session.prev().map(|_| None),
            NavTarget::Tab { index } => session.select_tab(index).map(|_| None),
            NavTarget::Step { index } => session.go_to_step(index).map(|_| None),
        },
        UiAction::Submit => session.submit().await.map(Some),
        UiAction::Reset => session.reset().map(|_| None),
    };
    outcome.map_err(|e| e.to_string())
}

fn validate_action(action: &UiAction) -> Result<(), IntakeError> {
    match action {
        UiAction::AddSymptom { name, duration, .. } => {
            check_len("symptom name", name, MAX_NAME_LEN)?;
            if let Some(duration) = duration {
                check_len("duration", duration, MAX_NAME_LEN)?;
            }
            Ok(())
        }
        UiAction::AddQuickSymptom { name } => check_len("symptom name", name, MAX_NAME_LEN),
        UiAction::AddItem { item, .. } => check_len("item", item, MAX_NAME_LEN),
        UiAction::AddMedication {
            name,
            dose,
            frequency,
        } => {
            check_len("medication name", name, MAX_NAME_LEN)?;
            check_len("dose", dose, MAX_NAME_LEN)?;
            check_len("frequency", frequency, MAX_NAME_LEN)
        }
        UiAction::SetField { field, value } => {
            let limit = if field.is_free_text() {
                MAX_TEXT_LEN
            } else {
                MAX_NAME_LEN
            };
            check_len(field.as_str(), value, limit)
        }
        UiAction::RemoveItem { .. } | UiAction::Navigate { .. } => Ok(()),
        UiAction::Submit | UiAction::Reset => Ok(()),
    }
}

fn check_len(label: &str, value: &str, max: usize) -> Result<(), IntakeError> {
    if value.chars().count() > max {
        return Err(IntakeError::InvalidInput(format!(
            "{label} too long (max {max} characters)"
        )));
    }
    Ok(())
}
