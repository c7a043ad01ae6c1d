use super::json_body;
use crate::validation::{profile, FieldErrors, ProfileInput};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

pub const VALIDATION_FAILED: &str = "Validation failed";

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdated {
    pub success: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileRejected {
    pub message: String,
    pub errors: FieldErrors,
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = ProfileInput,
    responses (
        (status = 200, description = "Profile is valid", body = ProfileUpdated, content_type = "application/json"),
        (status = 400, description = "One or more fields are invalid; a malformed body gets a `MessageResponse` instead", body = ProfileRejected),
    ),
    tag = "profile"
)]
// axum handler for profile updates
#[instrument(skip_all)]
pub async fn update_profile(payload: Result<Json<ProfileInput>, JsonRejection>) -> Response {
    let input = match json_body(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let errors = profile::validate(&input);

    if errors.is_empty() {
        debug!("Profile accepted");

        (StatusCode::OK, Json(ProfileUpdated { success: true })).into_response()
    } else {
        debug!(
            fields = ?errors.iter().map(|(field, _)| field).collect::<Vec<_>>(),
            "Profile rejected"
        );

        (
            StatusCode::BAD_REQUEST,
            Json(ProfileRejected {
                message: VALIDATION_FAILED.to_string(),
                errors,
            }),
        )
            .into_response()
    }
}
