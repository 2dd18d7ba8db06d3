//! Contact form controller: validation, CAPTCHA gating, and dispatch lifecycle.
//!
//! ARCHITECTURE
//! ============
//! Every transition is a response to one discrete event: an input change, a
//! CAPTCHA callback, a submit, a dispatch completion, a dismiss, or the
//! revert timer. State sits behind a mutex that is never held across an
//! await, so the dispatch call is the only suspension point.
//!
//! GUARANTEES
//! ==========
//! - Dispatch happens only when validation passes and a token is present.
//! - At most one dispatch is in flight per controller.
//! - Input survives a failed dispatch; it is cleared only on success.
//! - A revert timer from an earlier cycle can never clear a newer status.

pub mod status;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::captcha::{CaptchaToken, CaptchaWidget};
use crate::dispatch::{ContactMessage, MessageDispatch};
use crate::form::validation::{self, Field, ValidationErrors};
use crate::form::{FormField, FormFields, UnknownField};
use status::{RevertTimer, STATUS_DISPLAY, SubmissionStatus};

const SUBMIT_LABEL: &str = "Send Message";
const SUBMITTING_LABEL: &str = "Sending...";

/// Result of one `submit()` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent. The UI plays its shake cue.
    Rejected(ValidationErrors),
    /// A dispatch from an earlier call is still running; this call did nothing.
    InFlight,
    /// The dispatch finished and its status is now displayed.
    Completed(SubmissionStatus),
}

#[derive(Default)]
struct FormState {
    fields: FormFields,
    errors: ValidationErrors,
    token: Option<CaptchaToken>,
    status: SubmissionStatus,
    submitting: bool,
    /// Bumped each time a dispatch starts.
    cycle: u64,
    revert: RevertTimer,
}

/// Drives one mounted contact form.
pub struct ContactFormController {
    id: Uuid,
    state: Arc<Mutex<FormState>>,
    captcha: Arc<dyn CaptchaWidget>,
    dispatch: Arc<dyn MessageDispatch>,
}

impl ContactFormController {
    #[must_use]
    pub fn new(captcha: Arc<dyn CaptchaWidget>, dispatch: Arc<dyn MessageDispatch>) -> Self {
        Self { id: Uuid::new_v4(), state: Arc::new(Mutex::new(FormState::default())), captcha, dispatch }
    }

    /// Instance id carried in log fields.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock_state(&self.state)
    }

    // =========================================================================
    // INPUT EVENTS
    // =========================================================================

    /// Overwrite one field and drop its stale error, if any.
    ///
    /// Other fields' errors are left alone until the next submit.
    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut state = self.lock();
        state.fields.set(field, value);
        if state.errors.clear(field.into()) {
            debug!(form_id = %self.id, %field, "cleared field error on edit");
        }
    }

    /// [`update_field`](Self::update_field) keyed by the raw HTML input name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownField`] if `name` is not one of the form's inputs.
    pub fn update_named_field(&self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = name.parse::<FormField>()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Solve callback from the CAPTCHA widget.
    pub fn on_captcha_solved(&self, token: impl Into<String>) {
        let mut state = self.lock();
        state.token = Some(CaptchaToken::new(token));
        state.errors.clear(Field::Captcha);
        debug!(form_id = %self.id, "captcha solved");
    }

    /// Expiry callback from the CAPTCHA widget.
    pub fn on_captcha_expired(&self) {
        self.lock().token = None;
        debug!(form_id = %self.id, "captcha expired");
    }

    // =========================================================================
    // VALIDATION + SUBMISSION
    // =========================================================================

    /// Check the current inputs without recording the result.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let state = self.lock();
        validation::validate(&state.fields, state.token.as_ref())
    }

    /// Validate, then dispatch once and display the result.
    ///
    /// Calling this while a dispatch is in flight is a no-op. Failures are not
    /// retried; the visitor resubmits through the full cycle.
    pub async fn submit(&self) -> SubmitOutcome {
        let (message, cycle) = {
            let mut state = self.lock();
            if state.submitting {
                debug!(form_id = %self.id, "submit ignored: dispatch in flight");
                return SubmitOutcome::InFlight;
            }

            let errors = validation::validate(&state.fields, state.token.as_ref());
            state.errors = errors.clone();
            let token = match (&state.token, errors.is_empty()) {
                (Some(token), true) => token.clone(),
                _ => {
                    warn!(form_id = %self.id, fields = %errors.field_list(), "contact form rejected");
                    return SubmitOutcome::Rejected(errors);
                }
            };

            state.submitting = true;
            state.cycle += 1;
            state.revert.cancel();
            state.status = SubmissionStatus::Idle;

            let message = ContactMessage {
                sender_name: state.fields.name.clone(),
                sender_email: state.fields.email.clone(),
                body: state.fields.message.clone(),
                captcha_response: token.as_str().to_owned(),
            };
            (message, state.cycle)
        };

        let _in_flight = InFlightGuard { state: Arc::downgrade(&self.state), cycle };
        let result = self.dispatch.send(&message).await;

        let status = {
            let mut state = self.lock();
            state.submitting = false;
            state.status = match result {
                Ok(()) => {
                    info!(form_id = %self.id, cycle, "contact message sent");
                    state.fields.clear();
                    state.token = None;
                    SubmissionStatus::Success
                }
                Err(e) => {
                    warn!(form_id = %self.id, cycle, error = %e, "contact message dispatch failed");
                    SubmissionStatus::Error
                }
            };
            let weak = Arc::downgrade(&self.state);
            state.revert.schedule(STATUS_DISPLAY, move || revert_status(&weak, cycle));
            state.status
        };

        // Outside the lock: the widget may call straight back into us.
        if status == SubmissionStatus::Success {
            self.captcha.reset();
        }

        SubmitOutcome::Completed(status)
    }

    /// Close the banner now instead of waiting for the timer.
    pub fn dismiss_status(&self) {
        let mut state = self.lock();
        state.revert.cancel();
        state.status = SubmissionStatus::Idle;
    }

    // =========================================================================
    // VIEW ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    /// Errors recorded by the last submit, minus any cleared since.
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    #[must_use]
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        self.lock().errors.message(field)
    }

    #[must_use]
    pub fn has_captcha_token(&self) -> bool {
        self.lock().token.is_some()
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.lock().status
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { SUBMITTING_LABEL } else { SUBMIT_LABEL }
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        self.lock().revert.cancel();
    }
}

fn lock_state(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn revert_status(state: &Weak<Mutex<FormState>>, cycle: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock_state(&state);
    if state.cycle == cycle && !state.submitting {
        state.status = SubmissionStatus::Idle;
    }
}

/// Releases the in-flight flag if a submit future is dropped mid-dispatch.
struct InFlightGuard {
    state: Weak<Mutex<FormState>>,
    cycle: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = lock_state(&state);
        if state.cycle == self.cycle && state.submitting {
            state.submitting = false;
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
