use super::{json_body, message_response, CredentialVerifier, MessageResponse};
use crate::validation::{login, LoginInput};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::Response,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const LOGIN_SUCCESSFUL: &str = "Login successful!";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginInput,
    responses (
        (status = 200, description = "Login successful", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Missing fields, short password or malformed body", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
    ),
    tag = "login"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login(
    verifier: Extension<Arc<dyn CredentialVerifier>>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Response {
    let input = match json_body(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let (email, password) = match login::check(&input) {
        Ok(credentials) => credentials,
        Err(violation) => {
            debug!("Login rejected: {violation}");

            return message_response(StatusCode::BAD_REQUEST, violation.message());
        }
    };

    if verifier.verify(email, password) {
        info!("Login successful");

        message_response(StatusCode::OK, LOGIN_SUCCESSFUL)
    } else {
        debug!("Invalid credentials");

        message_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
    }
}
