//! Form controllers for the login and profile pages.
//!
//! A controller owns its [`FormState`]; a view layer renders the values, the
//! inline errors, the notification and disables the submit control while a
//! request is in flight. Both controllers run the shared [`crate::validation`]
//! rules before anything goes over the wire.

mod api;
mod errors;
mod form;
mod login;
mod profile;

pub use api::{ApiReply, FormApi, HttpApi, ReplyBody, LOGIN_PATH, PROFILE_PATH};
pub use errors::ClientError;
pub use form::{FormPhase, FormState, Notice, NoticeKind, SubmitOutcome, GENERIC_FAILURE, REQUEST_FAILED};
pub use login::{LoginForm, DEFAULT_LOGIN_MESSAGE};
pub use profile::{ProfileForm, PROFILE_UPDATED};
