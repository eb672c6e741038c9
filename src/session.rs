//! Intake session: the single state object behind one open form.
//!
//! Owns the selection store, the wizard and the raw field values, plus the
//! bundled knowledge base and the UI sink. All mutation goes through `&self`
//! methods so the host can share the session (`Arc`) between its event
//! handlers and the pending analysis future. Locks are never held across an
//! `.await`.
//!
//! Lock order: `analysis` before `form`.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::aggregator;
use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::intelligence::{clinical_warnings, match_symptoms, KnowledgeBase};
use crate::models::enums::{Collection, FormField, ListCategory, NotificationLevel, WizardStep};
use crate::models::{
    DiagnosisRecord, FormFields, Medication, MedicationEntry, PatientData, Symptom, SymptomEntry,
};
use crate::note;
use crate::selection::SelectionStore;
use crate::ui::{UiEvent, UiSink};
use crate::wizard::{Progress, WizardController};

/// Everything produced by one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub submission_id: Uuid,
    pub generated_at: NaiveDateTime,
    pub patient: PatientData,
    /// Ranked by descending probability.
    pub diagnoses: Vec<DiagnosisRecord>,
    pub warnings: Vec<String>,
    pub note: String,
}

#[derive(Debug, Default)]
struct FormState {
    selections: SelectionStore,
    wizard: WizardController,
    fields: FormFields,
}

/// Handle to the analysis currently waiting out its delay.
struct PendingAnalysis {
    id: Uuid,
    cancel_tx: oneshot::Sender<()>,
}

pub struct IntakeSession {
    form: Mutex<FormState>,
    analysis: Mutex<Option<PendingAnalysis>>,
    knowledge: KnowledgeBase,
    config: IntakeConfig,
    sink: Arc<dyn UiSink>,
}

impl IntakeSession {
    /// New session with the bundled knowledge base.
    pub fn new(config: IntakeConfig, sink: Arc<dyn UiSink>) -> Result<Self, IntakeError> {
        Ok(Self::with_knowledge(config, sink, KnowledgeBase::bundled()?))
    }

    pub fn with_knowledge(
        config: IntakeConfig,
        sink: Arc<dyn UiSink>,
        knowledge: KnowledgeBase,
    ) -> Self {
        Self {
            form: Mutex::new(FormState::default()),
            analysis: Mutex::new(None),
            knowledge,
            config,
            sink,
        }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    fn lock_form(&self) -> Result<MutexGuard<'_, FormState>, IntakeError> {
        self.form.lock().map_err(|_| IntakeError::LockPoisoned)
    }

    fn lock_analysis(&self) -> Result<MutexGuard<'_, Option<PendingAnalysis>>, IntakeError> {
        self.analysis.lock().map_err(|_| IntakeError::LockPoisoned)
    }

    fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        self.sink.emit(UiEvent::notification(
            message,
            level,
            self.config.notification_timeout,
        ));
    }

    /// Surface a failed operation. Validation failures are warnings, anything
    /// else is an error.
    fn notify_failure(&self, err: &IntakeError) {
        let level = if err.is_validation() {
            NotificationLevel::Warning
        } else {
            NotificationLevel::Error
        };
        self.notify(err.to_string(), level);
    }

    fn render(&self, form: &FormState, collection: Collection) {
        self.sink.emit(UiEvent::ListChanged {
            collection,
            contents: form.selections.contents(collection),
        });
    }

    // ── Read access ─────────────────────────────────────────

    pub fn current_step(&self) -> Result<usize, IntakeError> {
        Ok(self.lock_form()?.wizard.current_step())
    }

    pub fn current_step_name(&self) -> Result<WizardStep, IntakeError> {
        Ok(self.lock_form()?.wizard.current_name())
    }

    pub fn progress(&self) -> Result<Progress, IntakeError> {
        Ok(self.lock_form()?.wizard.progress())
    }

    pub fn symptoms(&self) -> Result<Vec<Symptom>, IntakeError> {
        Ok(self.lock_form()?.selections.symptoms().to_vec())
    }

    pub fn items(&self, category: ListCategory) -> Result<Vec<String>, IntakeError> {
        Ok(self.lock_form()?.selections.items(category).to_vec())
    }

    pub fn medications(&self) -> Result<Vec<Medication>, IntakeError> {
        Ok(self.lock_form()?.selections.medications().to_vec())
    }

    pub fn field(&self, field: FormField) -> Result<String, IntakeError> {
        Ok(self.lock_form()?.fields.get(field).to_string())
    }

    pub fn is_analysis_pending(&self) -> Result<bool, IntakeError> {
        Ok(self.lock_analysis()?.is_some())
    }

    // ── Selection store ─────────────────────────────────────

    /// Manual symptom entry. Returns whether the list changed.
    pub fn add_symptom(&self, entry: &SymptomEntry) -> Result<bool, IntakeError> {
        let mut form = self.lock_form()?;
        let added = form.selections.add_symptom(entry);
        if added {
            tracing::debug!(count = form.selections.symptoms().len(), "Symptom added");
            self.render(&form, Collection::Symptoms);
        }
        Ok(added)
    }

    /// Quick-tag symptom (moderate, unknown duration).
    pub fn add_quick_symptom(&self, name: &str) -> Result<bool, IntakeError> {
        let mut form = self.lock_form()?;
        let added = form.selections.add_quick_symptom(name);
        if added {
            tracing::debug!(count = form.selections.symptoms().len(), "Quick symptom added");
            self.render(&form, Collection::Symptoms);
        }
        Ok(added)
    }

    pub fn add_item(&self, category: ListCategory, item: &str) -> Result<bool, IntakeError> {
        let mut form = self.lock_form()?;
        let added = form.selections.add_item(category, item);
        if added {
            tracing::debug!(category = %category, "Item added");
            self.render(&form, category.into());
        }
        Ok(added)
    }

    pub fn add_medication(&self, entry: &MedicationEntry) -> Result<bool, IntakeError> {
        let mut form = self.lock_form()?;
        let added = form.selections.add_medication(entry);
        if added {
            tracing::debug!(count = form.selections.medications().len(), "Medication added");
            self.render(&form, Collection::Medications);
        }
        Ok(added)
    }

    /// Remove by display index. A stale index is silently ignored.
    pub fn remove(&self, collection: Collection, index: usize) -> Result<bool, IntakeError> {
        let mut form = self.lock_form()?;
        let removed = form.selections.remove(collection, index);
        if removed {
            tracing::debug!(collection = %collection, index, "Item removed");
            self.render(&form, collection);
            if collection == Collection::Symptoms {
                self.notify("Symptom removed", NotificationLevel::Info);
            }
        }
        Ok(removed)
    }

    // ── Fields ──────────────────────────────────────────────

    pub fn set_field(&self, field: FormField, value: &str) -> Result<(), IntakeError> {
        let mut form = self.lock_form()?;
        if let Some(bmi) = form.fields.set(field, value) {
            self.sink.emit(UiEvent::FieldChanged {
                field: FormField::Bmi,
                value: bmi,
            });
        }
        Ok(())
    }

    // ── Wizard ──────────────────────────────────────────────

    /// Advance if the current step validates; on failure a warning is shown
    /// and the step is unchanged.
    pub fn next(&self) -> Result<Option<Progress>, IntakeError> {
        let mut form = self.lock_form()?;
        let FormState { wizard, fields, .. } = &mut *form;
        match wizard.next(fields) {
            Ok(progress) => {
                if let Some(p) = &progress {
                    self.sink.emit(UiEvent::Progress(p.clone()));
                }
                Ok(progress)
            }
            Err(err) => {
                tracing::debug!(step = wizard.current_step(), "Step validation failed");
                self.notify_failure(&err);
                Err(err)
            }
        }
    }

    pub fn prev(&self) -> Result<Option<Progress>, IntakeError> {
        let mut form = self.lock_form()?;
        let progress = form.wizard.prev();
        self.emit_progress(&progress);
        Ok(progress)
    }

    pub fn go_to_step(&self, target: i64) -> Result<Option<Progress>, IntakeError> {
        let mut form = self.lock_form()?;
        let progress = form.wizard.go_to_step(target);
        self.emit_progress(&progress);
        Ok(progress)
    }

    pub fn select_tab(&self, index: i64) -> Result<Option<Progress>, IntakeError> {
        let mut form = self.lock_form()?;
        let progress = form.wizard.select_tab(index);
        self.emit_progress(&progress);
        Ok(progress)
    }

    fn emit_progress(&self, progress: &Option<Progress>) {
        if let Some(p) = progress {
            self.sink.emit(UiEvent::Progress(p.clone()));
        }
    }

    // ── Submit / reset ──────────────────────────────────────

    /// Validate, snapshot, wait out the analysis delay, then match, write the
    /// note, deliver the report and reset the form.
    ///
    /// Refused while another analysis is pending. Resolves to
    /// `AnalysisCancelled` if `reset` runs during the delay. Dropping the
    /// future releases the pending slot and re-enables submit.
    pub async fn submit(&self) -> Result<AnalysisReport, IntakeError> {
        let (patient, cancel_rx) = self.begin_analysis()?;
        let guard = PendingGuard {
            session: self,
            id: patient.submission_id,
        };

        tokio::select! {
            _ = tokio::time::sleep(self.config.analysis_delay) => {}
            _ = cancel_rx => {
                tracing::info!(submission_id = %patient.submission_id, "Analysis cancelled");
                return Err(IntakeError::AnalysisCancelled);
            }
        }

        let report = self.finish_analysis(patient)?;
        drop(guard);
        Ok(report)
    }

    fn begin_analysis(&self) -> Result<(PatientData, oneshot::Receiver<()>), IntakeError> {
        let mut pending = self.lock_analysis()?;
        if pending.is_some() {
            let err = IntakeError::AnalysisInProgress;
            self.notify_failure(&err);
            return Err(err);
        }

        let mut form = self.lock_form()?;
        let redirect = if WizardController::validate(0, &form.fields).is_err() {
            Some((IntakeError::MissingDemographics, WizardStep::Demographics))
        } else if form.selections.symptoms().is_empty() {
            Some((IntakeError::NoSymptoms, WizardStep::Presentation))
        } else {
            None
        };
        if let Some((err, step)) = redirect {
            let progress = form.wizard.go_to_step(step.index() as i64);
            self.emit_progress(&progress);
            self.notify_failure(&err);
            return Err(err);
        }

        let patient = aggregator::collect(&form.fields, &form.selections);
        drop(form);

        let (cancel_tx, cancel_rx) = oneshot::channel();
        *pending = Some(PendingAnalysis {
            id: patient.submission_id,
            cancel_tx,
        });
        drop(pending);

        tracing::info!(
            submission_id = %patient.submission_id,
            symptoms = patient.presentation.symptoms.len(),
            "Analysis started"
        );
        self.sink.emit(UiEvent::submit_available(false));
        Ok((patient, cancel_rx))
    }

    /// Deliver results, unless a reset already took the pending slot. The slot
    /// stays locked until the form is cleared, so a concurrent `reset` either
    /// wins outright or runs after delivery.
    fn finish_analysis(&self, patient: PatientData) -> Result<AnalysisReport, IntakeError> {
        let mut pending = self.lock_analysis()?;
        if !pending
            .as_ref()
            .is_some_and(|p| p.id == patient.submission_id)
        {
            tracing::info!(submission_id = %patient.submission_id, "Analysis superseded by reset");
            return Err(IntakeError::AnalysisCancelled);
        }

        let names: Vec<&str> = patient
            .presentation
            .symptoms
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let diagnoses = match_symptoms(&self.knowledge, &names);
        let warnings = clinical_warnings(&patient);
        let generated_at = Local::now().naive_local();
        let note = note::generate_at(&patient, &diagnoses, generated_at);

        let report = AnalysisReport {
            submission_id: patient.submission_id,
            generated_at,
            patient,
            diagnoses,
            warnings,
            note,
        };
        tracing::info!(
            submission_id = %report.submission_id,
            diagnoses = report.diagnoses.len(),
            warnings = report.warnings.len(),
            "Analysis complete"
        );

        self.sink.emit(UiEvent::AnalysisReady(Box::new(report.clone())));
        for warning in &report.warnings {
            self.notify(warning.clone(), NotificationLevel::Warning);
        }
        self.notify("Analysis complete", NotificationLevel::Success);

        let mut form = self.lock_form()?;
        self.clear_form(&mut form);
        drop(form);

        *pending = None;
        drop(pending);
        self.sink.emit(UiEvent::submit_available(true));
        Ok(report)
    }

    /// Release the pending slot if it still belongs to `id`.
    fn release(&self, id: Uuid) {
        let Ok(mut pending) = self.analysis.lock() else {
            return;
        };
        if pending.as_ref().is_some_and(|p| p.id == id) {
            *pending = None;
            drop(pending);
            self.sink.emit(UiEvent::submit_available(true));
        }
    }

    /// Cancel any pending analysis, clear every list and field, and return
    /// the wizard to the first step.
    pub fn reset(&self) -> Result<(), IntakeError> {
        let mut pending = self.lock_analysis()?;
        if let Some(cancelled) = pending.take() {
            tracing::info!(submission_id = %cancelled.id, "Reset cancels pending analysis");
            let _ = cancelled.cancel_tx.send(());
            self.sink.emit(UiEvent::submit_available(true));
        }
        let mut form = self.lock_form()?;
        self.clear_form(&mut form);
        Ok(())
    }

    fn clear_form(&self, form: &mut FormState) {
        form.selections.clear();
        form.fields.clear();
        let progress = form.wizard.reset();
        for collection in Collection::ALL {
            self.render(form, *collection);
        }
        self.sink.emit(UiEvent::Progress(progress));
        tracing::debug!("Form reset");
    }
}

/// Frees the pending-analysis slot when `submit` finishes or is dropped.
struct PendingGuard<'a> {
    session: &'a IntakeSession,
    id: Uuid,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.session.release(self.id);
    }
}
