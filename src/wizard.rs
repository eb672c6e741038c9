//! Wizard controller: which step of the intake form is showing.
//!
//! The current step only moves through `go_to_step`, `next`, `prev` and
//! `select_tab`, and always stays inside `[0, TOTAL_STEPS)`. Every accepted
//! move yields a [`Progress`] for the UI; refused moves yield `None` or a
//! validation error and leave the step unchanged.

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::models::enums::{FormField, WizardStep};
use crate::models::FormFields;

pub const TOTAL_STEPS: usize = 6;

/// Progress bar, step label and navigation-button state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub step: usize,
    pub step_name: WizardStep,
    pub total_steps: usize,
    /// `(step + 1) / total_steps`
    pub completed_fraction: f32,
    /// `Step {step + 1} of {total_steps}`
    pub label: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub show_submit: bool,
    /// One flag per step indicator dot; active when `index <= step`.
    pub active_indicators: Vec<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardController {
    current: usize,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn current_name(&self) -> WizardStep {
        WizardStep::from_index(self.current).unwrap_or(WizardStep::Demographics)
    }

    pub fn is_last_step(&self) -> bool {
        self.current == TOTAL_STEPS - 1
    }

    /// Jump to `target`. Out of range is a no-op.
    pub fn go_to_step(&mut self, target: i64) -> Option<Progress> {
        let target = usize::try_from(target).ok().filter(|t| *t < TOTAL_STEPS)?;
        self.current = target;
        Some(self.progress())
    }

    /// Advance one step if the current step validates. At the last step this
    /// is `Ok(None)`: the last step submits instead.
    pub fn next(&mut self, fields: &FormFields) -> Result<Option<Progress>, IntakeError> {
        Self::validate(self.current, fields)?;
        if self.is_last_step() {
            return Ok(None);
        }
        Ok(self.go_to_step(self.current as i64 + 1))
    }

    /// Step back. No-op at step 0.
    pub fn prev(&mut self) -> Option<Progress> {
        self.go_to_step(self.current as i64 - 1)
    }

    /// Tab click: any completed step or the one right after the current.
    pub fn select_tab(&mut self, index: i64) -> Option<Progress> {
        if index > self.current as i64 + 1 {
            return None;
        }
        self.go_to_step(index)
    }

    /// Back to the first step.
    pub fn reset(&mut self) -> Progress {
        self.current = 0;
        self.progress()
    }

    /// Blocking validation for a step. Only demographics has required fields.
    pub fn validate(step: usize, fields: &FormFields) -> Result<(), IntakeError> {
        match WizardStep::from_index(step) {
            Some(WizardStep::Demographics) => {
                if fields.is_filled(FormField::Age) && fields.is_filled(FormField::Gender) {
                    Ok(())
                } else {
                    Err(IntakeError::RequiredFieldsMissing)
                }
            }
            _ => Ok(()),
        }
    }

    pub fn progress(&self) -> Progress {
        let step = self.current;
        Progress {
            step,
            step_name: self.current_name(),
            total_steps: TOTAL_STEPS,
            completed_fraction: (step + 1) as f32 / TOTAL_STEPS as f32,
            label: format!("Step {} of {}", step + 1, TOTAL_STEPS),
            can_go_back: step > 0,
            can_go_forward: step < TOTAL_STEPS - 1,
            show_submit: step == TOTAL_STEPS - 1,
            active_indicators: (0..TOTAL_STEPS).map(|i| i <= step).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demographics_filled() -> FormFields {
        let mut fields = FormFields::new();
        fields.set(FormField::Age, "70");
        fields.set(FormField::Gender, "female");
        fields
    }

    #[test]
    fn starts_at_step_zero() {
        let wizard = WizardController::new();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.current_name(), WizardStep::Demographics);
        assert_eq!(TOTAL_STEPS, WizardStep::ALL.len());
    }

    #[test]
    fn out_of_range_targets_are_noops() {
        let mut wizard = WizardController::new();
        wizard.go_to_step(2);
        assert!(wizard.go_to_step(-1).is_none());
        assert!(wizard.go_to_step(TOTAL_STEPS as i64).is_none());
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn go_to_step_reports_progress() {
        let mut wizard = WizardController::new();
        let progress = wizard.go_to_step(2).unwrap();
        assert_eq!(progress.label, "Step 3 of 6");
        assert!((progress.completed_fraction - 0.5).abs() < f32::EPSILON);
        assert_eq!(progress.step_name, WizardStep::History);
        assert_eq!(
            progress.active_indicators,
            [true, true, true, false, false, false]
        );
    }

    #[test]
    fn next_blocked_without_demographics() {
        let mut wizard = WizardController::new();
        let mut fields = FormFields::new();
        fields.set(FormField::Age, "70");
        assert_eq!(
            wizard.next(&fields),
            Err(IntakeError::RequiredFieldsMissing)
        );
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn next_advances_when_valid() {
        let mut wizard = WizardController::new();
        let progress = wizard.next(&demographics_filled()).unwrap().unwrap();
        assert_eq!(progress.step, 1);
        // later steps never block
        assert!(wizard.next(&FormFields::new()).unwrap().is_some());
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn next_at_last_step_is_noop() {
        let mut wizard = WizardController::new();
        wizard.go_to_step(5);
        assert_eq!(wizard.next(&FormFields::new()), Ok(None));
        assert_eq!(wizard.current_step(), 5);
        assert!(wizard.progress().show_submit);
        assert!(!wizard.progress().can_go_forward);
    }

    #[test]
    fn prev_stops_at_zero() {
        let mut wizard = WizardController::new();
        assert!(wizard.prev().is_none());
        wizard.go_to_step(1);
        assert_eq!(wizard.prev().unwrap().step, 0);
        assert!(!wizard.progress().can_go_back);
    }

    #[test]
    fn tab_click_allows_one_step_ahead() {
        let mut wizard = WizardController::new();
        assert!(wizard.select_tab(2).is_none());
        assert_eq!(wizard.select_tab(1).unwrap().step, 1);
        assert_eq!(wizard.select_tab(2).unwrap().step, 2);
        assert_eq!(wizard.select_tab(0).unwrap().step, 0);
        assert!(wizard.select_tab(-1).is_none());
    }

    #[test]
    fn tab_click_skips_validation() {
        let mut wizard = WizardController::new();
        assert!(wizard.select_tab(1).is_some());
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut wizard = WizardController::new();
        wizard.go_to_step(4);
        let progress = wizard.reset();
        assert_eq!(progress.step, 0);
        assert_eq!(progress.label, "Step 1 of 6");
    }

    #[test]
    fn validate_trims_required_fields() {
        let mut fields = FormFields::new();
        fields.set(FormField::Age, " ");
        fields.set(FormField::Gender, "male");
        assert!(WizardController::validate(0, &fields).is_err());
        assert!(WizardController::validate(1, &fields).is_ok());
    }
}
