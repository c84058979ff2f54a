use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use super::reducer::{FlowEffect, FormAction, Transition, reduce};
use super::state::{CLEAR_FAILED_MESSAGE, FormState, Notice, SAVE_FAILED_MESSAGE};
use crate::export::{ExportError, ExportRequest, QuoteExporter};
use crate::storage::{DraftStore, StorageError, clear_draft, load_draft, save_draft};

/// Drives a [`FormState`] through [`reduce`] and carries out the resulting
/// effects against a draft store.
pub struct FormController<S: DraftStore> {
    state: FormState,
    store: S,
}

impl<S: DraftStore> FormController<S> {
    pub fn new(store: S) -> Self {
        Self {
            state: FormState::default(),
            store,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `action`, then runs its effects.
    ///
    /// Storage failures are logged and replace the notice with an error;
    /// they never change the record or the step.
    pub async fn dispatch(
        &mut self,
        action: FormAction,
    ) -> &FormState {
        let Transition { state, effects } = reduce(&self.state, action);
        self.state = state;

        for effect in effects {
            self.run(effect).await;
        }

        &self.state
    }

    /// Loads a saved draft, if any, into the form.
    ///
    /// Returns `true` when a draft was restored.
    ///
    /// # Errors
    ///
    /// Propagates [`StorageError`] from the store. The form is left as it
    /// was.
    pub async fn restore(&mut self) -> Result<bool, StorageError> {
        let Some(draft) = load_draft(&self.store).await? else {
            debug!("no saved draft");
            return Ok(false);
        };

        info!(step = draft.step.number(), "restoring saved draft");
        self.dispatch(FormAction::Restore {
            record: draft.record,
            step: draft.step,
        })
        .await;
        Ok(true)
    }

    /// Exports the current answers through `exporter`.
    ///
    /// The outcome is also reflected in the form's notice.
    ///
    /// # Errors
    ///
    /// * [`ExportError::InvalidRequest`] if an export is already running or
    ///   the full name is blank.
    /// * Any error the exporter returns.
    pub async fn export<E: QuoteExporter + ?Sized>(
        &mut self,
        exporter: &E,
        generated_on: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        if self.state.exporting {
            warn!("export requested while another is running");
            return Err(ExportError::InvalidRequest(
                "an export is already in progress".to_string(),
            ));
        }

        self.dispatch(FormAction::ExportStarted).await;

        let request = ExportRequest::new(self.state.record.clone(), generated_on);
        let outcome = match request.validate() {
            Ok(()) => exporter.export(&request).await,
            Err(e) => Err(e),
        };

        let finished = match &outcome {
            Ok(path) => {
                info!(path = %path.display(), "quote document exported");
                Ok(path.clone())
            }
            Err(e) => {
                error!(error = %e, "quote export failed");
                Err(e.to_string())
            }
        };
        self.dispatch(FormAction::ExportFinished(finished)).await;

        outcome
    }

    async fn run(
        &mut self,
        effect: FlowEffect,
    ) {
        match effect {
            FlowEffect::PersistDraft { record, step } => {
                match save_draft(&self.store, &record, step).await {
                    Ok(()) => info!(step = step.number(), "progress saved"),
                    Err(e) => {
                        error!(error = %e, "failed to save draft");
                        self.state.notice = Some(Notice::error(SAVE_FAILED_MESSAGE));
                    }
                }
            }
            FlowEffect::ClearDraft => match clear_draft(&self.store).await {
                Ok(()) => info!("form reset"),
                Err(e) => {
                    error!(error = %e, "failed to clear draft");
                    self.state.notice = Some(Notice::error(CLEAR_FAILED_MESSAGE));
                }
            },
        }
    }
}
