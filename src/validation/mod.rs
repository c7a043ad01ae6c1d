//! Field validation shared by the HTTP handlers and the client form controllers.
//!
//! Every rule is a pure function of its input. The profile rules collect one
//! message per failing field; the login rules report the first violation the
//! server answers with, and can also be projected onto individual fields for
//! inline display.

pub mod login;
pub mod profile;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub use login::{LoginInput, LoginViolation, MIN_PASSWORD_LENGTH};
pub use profile::{ProfileField, ProfileInput};

/// Mapping from field name to a human readable message. Only failing fields are
/// present; an empty mapping means the input is valid.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Remove the message for `field`, returning it if one was set.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Merge `other` into `self`; messages from `other` win on conflict.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// `local@domain.tld` shape check, no whitespace and a single `@`.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("first.last@sub.example.org"));
        assert!(!valid_email("invalid-email"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@example.com"));
        assert!(!valid_email("a@@example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn field_errors_merge_overrides_existing_messages() {
        let mut errors: FieldErrors = [("email", "old"), ("phone", "bad")].into_iter().collect();
        errors.merge([("email", "new")].into_iter().collect());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("new"));
        assert_eq!(errors.get("phone"), Some("bad"));
    }

    #[test]
    fn field_errors_serialize_as_flat_object() -> anyhow::Result<()> {
        let errors: FieldErrors = [("username", "too short")].into_iter().collect();
        let value = serde_json::to_value(&errors)?;
        assert_eq!(value, serde_json::json!({ "username": "too short" }));
        Ok(())
    }
}
