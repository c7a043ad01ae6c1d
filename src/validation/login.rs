use super::FieldErrors;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";

/// Login payload. The password is kept behind [`SecretString`] so it never shows
/// up in `Debug` output or traces.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_password"
    )]
    #[schema(value_type = Option<String>, format = Password)]
    pub password: Option<SecretString>,
}

fn expose_password<S: Serializer>(
    password: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match password {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

impl LoginInput {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(SecretString::from(password.into())),
        }
    }

    /// Email when present and non-empty.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// Password when present and non-empty.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|password| !password.is_empty())
    }
}

/// Reasons a login request is rejected before credentials are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginViolation {
    MissingFields,
    PasswordTooShort,
}

impl LoginViolation {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Email and password are required.",
            Self::PasswordTooShort => "Password must be at least 6 characters.",
        }
    }
}

impl fmt::Display for LoginViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Check the login rules in order: both fields present, then password length.
/// Returns the `(email, password)` pair that passed.
///
/// # Errors
/// Returns the first violated rule.
pub fn check(input: &LoginInput) -> Result<(&str, &str), LoginViolation> {
    let (Some(email), Some(password)) = (input.email(), input.password()) else {
        return Err(LoginViolation::MissingFields);
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(LoginViolation::PasswordTooShort);
    }

    Ok((email, password))
}

/// The same rules as [`check`], projected onto the `email` and `password` fields.
#[must_use]
pub fn field_errors(input: &LoginInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if input.email().is_none() {
        errors.insert("email", EMAIL_REQUIRED);
    }

    match input.password() {
        None => errors.insert("password", PASSWORD_REQUIRED),
        Some(password) if password.chars().count() < MIN_PASSWORD_LENGTH => {
            errors.insert("password", LoginViolation::PasswordTooShort.message());
        }
        Some(_) => {}
    }

    errors
}
