//! # Formgate
//!
//! Login and profile-update forms backed by two JSON endpoints.
//!
//! ## Validation
//!
//! The rules live in [`validation`] and are the single source of truth for both
//! sides of the wire:
//!
//! - The **client** form controllers in [`client`] run them before sending
//!   anything, so obviously invalid input never leaves the form.
//! - The **server** handlers in [`api`] run them again on every request and
//!   answer with the same messages.
//!
//! Profile validation never stops at the first failure; every failing field is
//! reported. Login validation checks presence, then password length, then the
//! credential pair.
//!
//! ## Endpoints
//!
//! - `PUT /api/profile` answers `{ "success": true }` or 400 with
//!   `{ "message": "Validation failed", "errors": { field: message } }`.
//! - `POST /api/login` answers `{ "message": ... }` with 200, 400 or 401.
//!
//! Unreadable JSON bodies are answered with a structured 400 on both routes.

pub mod api;
pub mod cli;
pub mod client;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
