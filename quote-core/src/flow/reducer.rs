use std::path::PathBuf;

use tracing::debug;

use super::state::{EXPORT_FAILED_MESSAGE, FormState, Notice, SAVED_MESSAGE, SUBMITTED_MESSAGE};
use crate::{AnswerRecord, Field, Step, ValidationErrors, validate_step};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edit { field: Field, value: String },
    Next,
    Back,
    Save,
    Reset,
    Restore { record: AnswerRecord, step: Step },
    Submit,
    EmailQuote,
    ExportStarted,
    /// Path of the written document, or the failure description.
    ExportFinished(Result<PathBuf, String>),
    DismissNotice,
}

/// Side effects a transition asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    PersistDraft { record: AnswerRecord, step: Step },
    ClearDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub effects: Vec<FlowEffect>,
}

impl Transition {
    fn to(state: FormState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with_effect(
        state: FormState,
        effect: FlowEffect,
    ) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Applies `action` to `state`.
///
/// Pure: the input state is not modified and nothing is persisted. Actions
/// that do not apply to the current state return it unchanged.
pub fn reduce(
    state: &FormState,
    action: FormAction,
) -> Transition {
    let mut next = state.clone();

    match action {
        FormAction::Edit { field, value } => {
            if field.step() != state.step {
                debug!(field = field.name(), step = state.step.number(), "edit off the current step");
                next.notice = Some(Notice::answered_on_other_step(field));
                return Transition::to(next);
            }
            next.record.set(field, value);
            next.errors.clear(field);
        }

        FormAction::Next => {
            let Some(target) = state.step.next() else {
                return Transition::to(next);
            };

            let errors = validate_step(state.step, &state.record);
            if errors.is_empty() {
                debug!(from = state.step.number(), to = target.number(), "advancing");
                next.step = target;
                next.errors = ValidationErrors::new();
            } else {
                debug!(step = state.step.number(), errors = errors.len(), "step blocked");
                next.errors = errors;
            }
        }

        FormAction::Back => {
            if let Some(target) = state.step.previous() {
                next.step = target;
                next.errors = ValidationErrors::new();
            }
        }

        FormAction::Save => {
            next.notice = Some(Notice::success(SAVED_MESSAGE));
            return Transition::with_effect(
                next,
                FlowEffect::PersistDraft {
                    record: state.record.clone(),
                    step: state.step,
                },
            );
        }

        FormAction::Reset => {
            return Transition::with_effect(FormState::default(), FlowEffect::ClearDraft);
        }

        FormAction::Restore { record, step } => {
            next.record = record;
            next.step = step;
            next.errors = ValidationErrors::new();
        }

        FormAction::Submit => {
            if state.step.is_terminal() {
                next.notice = Some(Notice::success(SUBMITTED_MESSAGE));
            }
        }

        FormAction::EmailQuote => {
            if state.step.is_terminal() {
                next.notice = Some(Notice::emailed_to(&state.record.email));
            }
        }

        FormAction::ExportStarted => {
            if !state.exporting {
                next.exporting = true;
            }
        }

        FormAction::ExportFinished(outcome) => {
            next.exporting = false;
            next.notice = Some(match outcome {
                Ok(path) => Notice::exported_to(&path),
                Err(_) => Notice::error(EXPORT_FAILED_MESSAGE),
            });
        }

        FormAction::DismissNotice => {
            next.notice = None;
        }
    }

    Transition::to(next)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flow::state::NoticeKind;

    fn complete_record() -> AnswerRecord {
        AnswerRecord::new()
            .with(Field::FullName, "Watu Matuze")
            .with(Field::Email, "watu@example.com")
            .with(Field::Phone, "0977000000")
            .with(Field::IdNumber, "123456/78/9")
            .with(Field::VehicleMake, "Toyota")
            .with(Field::VehicleModel, "Hilux")
            .with(Field::YearOfManufacture, "2019")
            .with(Field::RegistrationNumber, "BAA 1234")
            .with(Field::VehicleValue, "20000")
            .with(Field::CoverageType, "comprehensive")
            .with(Field::VehicleUsage, "commercial")
    }

    fn at(
        step: Step,
        record: AnswerRecord,
    ) -> FormState {
        FormState {
            step,
            record,
            ..FormState::default()
        }
    }

    fn edit(
        field: Field,
        value: &str,
    ) -> FormAction {
        FormAction::Edit {
            field,
            value: value.to_string(),
        }
    }

    // ── Next / Back ──────────────────────────────────────────────────────

    #[test]
    fn next_with_errors_stays_and_records_them() {
        let t = reduce(&FormState::default(), FormAction::Next);

        assert_eq!(t.state.step, Step::Personal);
        assert_eq!(t.state.errors.len(), 4);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn next_on_valid_step_advances_and_clears_errors() {
        let blocked = reduce(&FormState::default(), FormAction::Next).state;
        let state = FormState {
            record: complete_record(),
            ..blocked
        };

        let t = reduce(&state, FormAction::Next);

        assert_eq!(t.state.step, Step::Vehicle);
        assert!(t.state.errors.is_empty());
    }

    #[test]
    fn walks_all_steps_with_a_complete_record() {
        let mut state = at(Step::Personal, complete_record());
        for expected in [Step::Vehicle, Step::Coverage, Step::Summary] {
            state = reduce(&state, FormAction::Next).state;
            assert_eq!(state.step, expected);
        }

        let t = reduce(&state, FormAction::Next);
        assert_eq!(t.state, state);
    }

    #[test]
    fn back_moves_one_step_and_clears_errors() {
        let state = reduce(&at(Step::Vehicle, AnswerRecord::new()), FormAction::Next).state;
        assert!(!state.errors.is_empty());

        let t = reduce(&state, FormAction::Back);

        assert_eq!(t.state.step, Step::Personal);
        assert!(t.state.errors.is_empty());
    }

    #[test]
    fn back_on_first_step_is_a_no_op() {
        let state = FormState::default();

        assert_eq!(reduce(&state, FormAction::Back).state, state);
    }

    #[test]
    fn step_stays_in_range() {
        let actions = [
            FormAction::Back,
            FormAction::Next,
            FormAction::Next,
            FormAction::Back,
            FormAction::Next,
            FormAction::Next,
            FormAction::Next,
            FormAction::Next,
        ];

        let mut state = at(Step::Personal, complete_record());
        for action in actions {
            state = reduce(&state, action).state;
            assert!((1..=4).contains(&state.step.number()));
        }
    }

    // ── Edit ─────────────────────────────────────────────────────────────

    #[test]
    fn edit_clears_only_that_fields_error() {
        let state = reduce(&FormState::default(), FormAction::Next).state;

        let t = reduce(&state, edit(Field::Email, "x"));

        assert_eq!(t.state.record.email, "x");
        assert_eq!(t.state.errors.get(Field::Email), None);
        assert_eq!(t.state.errors.get(Field::FullName), Some("Name is required"));
        assert_eq!(t.state.errors.len(), 3);
    }

    #[test]
    fn edit_does_not_revalidate() {
        let state = FormState::default();

        let t = reduce(&state, edit(Field::Email, "not an email"));

        assert!(t.state.errors.is_empty());
    }

    #[test]
    fn edit_of_another_steps_field_is_rejected() {
        let state = at(Step::Coverage, complete_record());

        let t = reduce(&state, edit(Field::FullName, ""));

        assert_eq!(t.state.record, complete_record());
        assert_eq!(t.state.step, Step::Coverage);
        assert_eq!(
            t.state.notice,
            Some(Notice::error(
                "Full Name is answered on Step 1 of 4: Personal Details; go there to change it."
            ))
        );
        assert!(t.effects.is_empty());
    }

    #[test]
    fn summary_step_accepts_no_edits() {
        let state = at(Step::Summary, complete_record());

        for field in Field::ALL {
            let t = reduce(&state, edit(field, "changed"));
            assert_eq!(t.state.record, complete_record());
        }
    }

    #[test]
    fn edit_on_its_own_step_is_applied() {
        let state = at(Step::Vehicle, complete_record());

        let t = reduce(&state, edit(Field::VehicleMake, "Nissan"));

        assert_eq!(t.state.record.vehicle_make, "Nissan");
        assert_eq!(t.state.notice, None);
    }

    // ── Save / Reset / Restore ───────────────────────────────────────────

    #[test]
    fn save_persists_record_and_step() {
        let state = at(Step::Coverage, complete_record());

        let t = reduce(&state, FormAction::Save);

        assert_eq!(
            t.effects,
            vec![FlowEffect::PersistDraft {
                record: complete_record(),
                step: Step::Coverage,
            }]
        );
        assert_eq!(t.state.notice, Some(Notice::success("Progress saved successfully!")));
        assert_eq!(t.state.record, state.record);
        assert_eq!(t.state.step, state.step);
    }

    #[test]
    fn reset_returns_to_the_initial_state() {
        let mut state = at(Step::Summary, complete_record());
        state = reduce(&state, FormAction::Submit).state;
        state.errors.set(Field::Email, "Invalid email");

        let t = reduce(&state, FormAction::Reset);

        assert_eq!(t.state, FormState::default());
        assert_eq!(t.effects, vec![FlowEffect::ClearDraft]);
    }

    #[test]
    fn restore_replaces_record_and_step() {
        let state = reduce(&FormState::default(), FormAction::Next).state;

        let t = reduce(
            &state,
            FormAction::Restore {
                record: complete_record(),
                step: Step::Coverage,
            },
        );

        assert_eq!(t.state.step, Step::Coverage);
        assert_eq!(t.state.record, complete_record());
        assert!(t.state.errors.is_empty());
        assert!(t.effects.is_empty());
    }

    // ── Summary actions ──────────────────────────────────────────────────

    #[test]
    fn submit_on_summary_sets_confirmation() {
        let t = reduce(&at(Step::Summary, complete_record()), FormAction::Submit);

        assert_eq!(
            t.state.notice,
            Some(Notice::success(
                "Quote request submitted successfully! Our team will contact you shortly."
            ))
        );
    }

    #[test]
    fn submit_before_summary_is_ignored() {
        let state = at(Step::Coverage, complete_record());

        assert_eq!(reduce(&state, FormAction::Submit).state, state);
        assert_eq!(reduce(&state, FormAction::EmailQuote).state, state);
    }

    #[test]
    fn email_notice_uses_the_entered_address() {
        let t = reduce(&at(Step::Summary, complete_record()), FormAction::EmailQuote);

        let notice = t.state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.message, "Quote would be emailed to watu@example.com");
    }

    #[test]
    fn dismiss_clears_the_notice() {
        let state = reduce(&FormState::default(), FormAction::Save).state;

        assert_eq!(reduce(&state, FormAction::DismissNotice).state.notice, None);
    }

    // ── Export ───────────────────────────────────────────────────────────

    #[test]
    fn export_started_sets_the_flag_once() {
        let state = at(Step::Summary, complete_record());

        let started = reduce(&state, FormAction::ExportStarted).state;
        let again = reduce(&started, FormAction::ExportStarted).state;

        assert!(started.exporting);
        assert_eq!(again, started);
    }

    #[test]
    fn export_success_clears_flag_and_names_file() {
        let state = reduce(&at(Step::Summary, complete_record()), FormAction::ExportStarted).state;

        let t = reduce(
            &state,
            FormAction::ExportFinished(Ok(PathBuf::from("quote.txt"))),
        );

        assert!(!t.state.exporting);
        assert_eq!(
            t.state.notice,
            Some(Notice::success("Quote document saved to quote.txt"))
        );
    }

    #[test]
    fn export_failure_keeps_record_and_step() {
        let state = reduce(&at(Step::Summary, complete_record()), FormAction::ExportStarted).state;

        let t = reduce(&state, FormAction::ExportFinished(Err("disk full".to_string())));

        assert!(!t.state.exporting);
        assert_eq!(t.state.step, Step::Summary);
        assert_eq!(t.state.record, complete_record());
        assert_eq!(
            t.state.notice,
            Some(Notice::error(
                "Failed to generate the quote document. Please try again."
            ))
        );
    }
}
