//! Route handlers and the pieces they share: the JSON body extractor that turns
//! unreadable payloads into a structured 400, and the credential seam used by
//! the login handler.

pub mod health;
pub mod login;
pub mod profile;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub const MALFORMED_BODY: &str = "Malformed request body.";

/// Body carried by every response that only has a message.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `(status, { "message": ... })`
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

/// Unwrap an extracted JSON body or answer 400 with [`MALFORMED_BODY`].
///
/// # Errors
/// Returns the ready-made 400 response when the body could not be read.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            error!("Failed to read request body: {}", rejection.body_text());

            Err(message_response(StatusCode::BAD_REQUEST, MALFORMED_BODY))
        }
    }
}

/// Decides whether an email/password pair may log in.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Accepts exactly one hardcoded pair. Placeholder for a real credential store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCredential;

impl FixedCredential {
    pub const EMAIL: &'static str = "test@example.com";
    pub const PASSWORD: &'static str = "password123";
}

impl CredentialVerifier for FixedCredential {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == Self::EMAIL && password == Self::PASSWORD
    }
}
