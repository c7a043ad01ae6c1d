use super::{valid_email, FieldErrors};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const MIN_USERNAME_LENGTH: usize = 6;
pub const MAX_BIO_LENGTH: usize = 160;

pub const USERNAME_TOO_SHORT: &str = "Username must be at least 6 characters.";
pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const EMAIL_INVALID: &str = "Must be a valid email format.";
pub const PHONE_INVALID: &str = "Phone must be 10-15 digits.";
pub const BIRTH_DATE_IN_FUTURE: &str = "Birth date cannot be in the future.";
pub const BIRTH_DATE_INVALID: &str = "Birth date must be a valid date (YYYY-MM-DD).";
pub const BIO_TOO_LONG: &str = "Bio must be 160 characters or less.";

/// Profile update payload, as sent by the profile form.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// ISO `YYYY-MM-DD`; empty or missing means not provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "1990-04-12")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Fields of [`ProfileInput`], named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Username,
    FullName,
    Email,
    Phone,
    BirthDate,
    Bio,
}

impl ProfileField {
    pub const ALL: [Self; 6] = [
        Self::Username,
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::BirthDate,
        Self::Bio,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::BirthDate => "birthDate",
            Self::Bio => "bio",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProfileInput {
    /// Set one field from raw form text. Optional fields treat empty text as absent.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Username => self.username = value,
            ProfileField::FullName => self.full_name = value,
            ProfileField::Email => self.email = value,
            ProfileField::Phone => self.phone = value,
            ProfileField::BirthDate => self.birth_date = non_empty(value),
            ProfileField::Bio => self.bio = non_empty(value),
        }
    }

    /// Raw form text for one field.
    #[must_use]
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::FullName => &self.full_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::BirthDate => self.birth_date.as_deref().unwrap_or_default(),
            ProfileField::Bio => self.bio.as_deref().unwrap_or_default(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Validate a profile against today's UTC date.
#[must_use]
pub fn validate(input: &ProfileInput) -> FieldErrors {
    validate_on(input, Utc::now().date_naive())
}

/// Validate a profile with an explicit "today" for the birth date rule.
///
/// Every field is checked; the result holds one message per failing field.
#[must_use]
pub fn validate_on(input: &ProfileInput, today: NaiveDate) -> FieldErrors {
    ProfileField::ALL
        .into_iter()
        .filter_map(|field| check_field(input, field, today).map(|message| (field.as_str(), message)))
        .collect()
}

/// Check a single field, returning its message when the rule is violated.
#[must_use]
pub fn check_field(input: &ProfileInput, field: ProfileField, today: NaiveDate) -> Option<&'static str> {
    match field {
        ProfileField::Username => {
            (input.username.chars().count() < MIN_USERNAME_LENGTH).then_some(USERNAME_TOO_SHORT)
        }
        ProfileField::FullName => input.full_name.trim().is_empty().then_some(FULL_NAME_REQUIRED),
        ProfileField::Email => (!valid_email(&input.email)).then_some(EMAIL_INVALID),
        ProfileField::Phone => (!valid_phone(&input.phone)).then_some(PHONE_INVALID),
        ProfileField::BirthDate => match input.birth_date.as_deref() {
            None | Some("") => None,
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if date > today => Some(BIRTH_DATE_IN_FUTURE),
                Ok(_) => None,
                Err(_) => Some(BIRTH_DATE_INVALID),
            },
        },
        ProfileField::Bio => input
            .bio
            .as_deref()
            .filter(|bio| bio.chars().count() > MAX_BIO_LENGTH)
            .map(|_| BIO_TOO_LONG),
    }
}

/// 10 to 15 ASCII digits, nothing else.
pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^[0-9]{10,15}$").is_ok_and(|re| re.is_match(phone))
}
