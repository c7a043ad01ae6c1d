use super::{FormApi, FormState, SubmitOutcome};
use crate::validation::{login, LoginInput};
use secrecy::SecretString;
use tracing::instrument;

pub const DEFAULT_LOGIN_MESSAGE: &str = "Login successful!";

/// Controller behind the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    state: FormState<LoginInput>,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &FormState<LoginInput> {
        &self.state
    }

    #[must_use]
    pub fn email_error(&self) -> Option<&str> {
        self.state.errors().get("email")
    }

    #[must_use]
    pub fn password_error(&self) -> Option<&str> {
        self.state.errors().get("password")
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.state.edit("email", |values| values.email = Some(email));
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        let password = SecretString::from(password.into());
        self.state
            .edit("password", |values| values.password = Some(password));
    }

    pub fn dismiss_notice(&mut self) {
        self.state.dismiss_notice();
    }

    /// Validate locally and, if both fields pass, send the credentials.
    #[instrument(skip_all)]
    pub async fn submit<A: FormApi>(&mut self, api: &A) -> SubmitOutcome {
        if !self.state.validate(login::field_errors) {
            return SubmitOutcome::Invalid;
        }

        self.state.begin_submit();
        let result = api.login(self.state.values()).await;

        self.state.complete(result, |reply| {
            reply
                .body
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_LOGIN_MESSAGE.to_string())
        })
    }
}
