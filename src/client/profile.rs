use super::{FormApi, FormState, SubmitOutcome};
use crate::validation::{profile, ProfileField, ProfileInput};
use tracing::instrument;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";

/// Controller behind the profile form.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    state: FormState<ProfileInput>,
}

impl ProfileForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing values, e.g. the currently stored profile.
    #[must_use]
    pub fn with_values(values: ProfileInput) -> Self {
        Self {
            state: FormState::new(values),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState<ProfileInput> {
        &self.state
    }

    /// Inline error for `field`, if any.
    #[must_use]
    pub fn error(&self, field: ProfileField) -> Option<&str> {
        self.state.errors().get(field.as_str())
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.state
            .edit(field.as_str(), |values| values.set(field, value));
    }

    pub fn dismiss_notice(&mut self) {
        self.state.dismiss_notice();
    }

    /// Validate locally and, if everything passes, send the profile.
    #[instrument(skip_all)]
    pub async fn submit<A: FormApi>(&mut self, api: &A) -> SubmitOutcome {
        if !self.state.validate(profile::validate) {
            return SubmitOutcome::Invalid;
        }

        self.state.begin_submit();
        let result = api.update_profile(self.state.values()).await;

        self.state
            .complete(result, |_| PROFILE_UPDATED.to_string())
    }
}
