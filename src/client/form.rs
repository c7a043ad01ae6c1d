//! State shared by the form controllers: field values, the error mapping shown
//! inline, the in-flight flag and the notification banner.
//!
//! Transitions:
//!
//! ```text
//! Idle -> Invalid  -> (edit) Idle
//!      -> Submitting -> Success -> Idle
//!                    -> Failed  -> Idle
//! ```
//!
//! Validation is synchronous and runs inside `submit`, so it has no phase of
//! its own. The in-flight flag only disables the submit control; a new submit
//! always goes through, which also recovers a form whose previous request
//! future was dropped.

use super::{ApiReply, ClientError};
use crate::validation::FieldErrors;
use tracing::{debug, error};

/// Shown when the request never produced a response.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";
/// Shown when an error response carries neither field errors nor a message.
pub const REQUEST_FAILED: &str = "Request failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Invalid,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message the view shows above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// How a submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Succeeded,
    /// The server answered with an error status.
    Rejected,
    /// The request did not produce a usable response.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct FormState<V> {
    values: V,
    errors: FieldErrors,
    in_flight: bool,
    phase: FormPhase,
    notice: Option<Notice>,
}

impl<V> FormState<V> {
    pub fn new(values: V) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            in_flight: false,
            phase: FormPhase::Idle,
            notice: None,
        }
    }

    pub const fn values(&self) -> &V {
        &self.values
    }

    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The submit control is disabled while a request is outstanding.
    pub const fn is_submit_disabled(&self) -> bool {
        self.in_flight
    }

    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply an edit to `field` and drop its inline error.
    pub fn edit(&mut self, field: &str, apply: impl FnOnce(&mut V)) {
        apply(&mut self.values);

        if self.errors.remove(field).is_some() {
            debug!("Cleared error for {field}");
        }

        if matches!(
            self.phase,
            FormPhase::Invalid | FormPhase::Success | FormPhase::Failed
        ) {
            self.phase = FormPhase::Idle;
        }
    }

    /// Hide the notification and settle back to `Idle`.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;

        if matches!(self.phase, FormPhase::Success | FormPhase::Failed) {
            self.phase = FormPhase::Idle;
        }
    }

    /// Run local validation. Returns `false` (and shows the errors) if any field failed.
    pub(crate) fn validate(&mut self, rules: impl FnOnce(&V) -> FieldErrors) -> bool {
        self.notice = None;

        let errors = rules(&self.values);
        if errors.is_empty() {
            self.errors.clear();
            self.phase = FormPhase::Idle;
            return true;
        }

        debug!("Local validation failed for {} field(s)", errors.len());

        self.errors = errors;
        self.phase = FormPhase::Invalid;
        false
    }

    pub(crate) fn begin_submit(&mut self) {
        if self.in_flight {
            debug!("Previous request was abandoned, submitting again");
        }

        self.in_flight = true;
        self.phase = FormPhase::Submitting;
    }

    /// Fold the request result into the state.
    pub(crate) fn complete(
        &mut self,
        result: Result<ApiReply, ClientError>,
        success_message: impl FnOnce(&ApiReply) -> String,
    ) -> SubmitOutcome {
        self.in_flight = false;

        match result {
            Ok(reply) if reply.is_success() => {
                self.errors.clear();
                self.notice = Some(Notice::success(success_message(&reply)));
                self.phase = FormPhase::Success;

                SubmitOutcome::Succeeded
            }

            Ok(reply) => {
                debug!("Server rejected the form with {}", reply.status);

                match reply.body.errors {
                    Some(errors) if !errors.is_empty() => self.errors.merge(errors),
                    _ => {
                        let message = reply
                            .body
                            .message
                            .unwrap_or_else(|| REQUEST_FAILED.to_string());
                        self.notice = Some(Notice::error(message));
                    }
                }
                self.phase = FormPhase::Failed;

                SubmitOutcome::Rejected
            }

            Err(err) => {
                error!("Form submission failed: {err}");

                self.notice = Some(Notice::error(GENERIC_FAILURE));
                self.phase = FormPhase::Failed;

                SubmitOutcome::Failed
            }
        }
    }
}
