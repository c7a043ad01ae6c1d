//! Form controllers against the real router on a local port, plus a scripted
//! API for transport failures.

use anyhow::Result;
use formgate::{
    api::{router, CredentialVerifier, FixedCredential},
    client::{
        ApiReply, ClientError, FormApi, FormPhase, HttpApi, LoginForm, NoticeKind, ProfileForm,
        ReplyBody, SubmitOutcome, GENERIC_FAILURE, PROFILE_UPDATED,
    },
    validation::{LoginInput, ProfileField, ProfileInput},
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::net::TcpListener;

async fn spawn_server() -> Result<HttpApi> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(FixedCredential);
    let app = router(verifier, None)?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });

    Ok(HttpApi::new(&format!("http://{addr}"))?)
}

/// Counts calls and answers with a canned result.
struct ScriptedApi {
    calls: AtomicUsize,
    reply: fn() -> Result<ApiReply, ClientError>,
}

impl ScriptedApi {
    fn new(reply: fn() -> Result<ApiReply, ClientError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FormApi for ScriptedApi {
    async fn update_profile(&self, _input: &ProfileInput) -> Result<ApiReply, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }

    async fn login(&self, _input: &LoginInput) -> Result<ApiReply, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}

/// Never answers.
struct HangingApi;

impl FormApi for HangingApi {
    async fn update_profile(&self, _input: &ProfileInput) -> Result<ApiReply, ClientError> {
        std::future::pending().await
    }

    async fn login(&self, _input: &LoginInput) -> Result<ApiReply, ClientError> {
        std::future::pending().await
    }
}

fn ok_reply() -> Result<ApiReply, ClientError> {
    Ok(ApiReply {
        status: 200,
        body: ReplyBody {
            success: Some(true),
            ..ReplyBody::default()
        },
    })
}

fn undecodable_reply() -> Result<ApiReply, ClientError> {
    match serde_json::from_str::<ReplyBody>("<html>") {
        Ok(body) => Ok(ApiReply { status: 502, body }),
        Err(source) => Err(ClientError::Decode {
            status: 502,
            source,
        }),
    }
}

fn filled_profile_form() -> ProfileForm {
    let mut form = ProfileForm::new();
    form.set_field(ProfileField::Username, "johndoe");
    form.set_field(ProfileField::FullName, "John Doe");
    form.set_field(ProfileField::Email, "john@example.com");
    form.set_field(ProfileField::Phone, "1234567890");
    form.set_field(ProfileField::BirthDate, "1990-01-01");
    form.set_field(ProfileField::Bio, "Hello");
    form
}

#[tokio::test]
async fn profile_form_submits_valid_values() -> Result<()> {
    let api = spawn_server().await?;
    let mut form = filled_profile_form();

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(form.state().phase(), FormPhase::Success);
    assert!(form.state().errors().is_empty());
    assert!(!form.state().is_submit_disabled());
    assert_eq!(
        form.state().notice().map(|n| (n.kind, n.message.as_str())),
        Some((NoticeKind::Success, PROFILE_UPDATED))
    );
    Ok(())
}

#[tokio::test]
async fn profile_form_blocks_invalid_values_locally() -> Result<()> {
    let api = ScriptedApi::new(ok_reply);
    let mut form = filled_profile_form();
    form.set_field(ProfileField::Username, "short");
    form.set_field(ProfileField::Phone, "123");

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(api.calls(), 0);
    assert_eq!(form.state().phase(), FormPhase::Invalid);
    assert_eq!(
        form.error(ProfileField::Username),
        Some("Username must be at least 6 characters.")
    );
    assert_eq!(form.error(ProfileField::Phone), Some("Phone must be 10-15 digits."));

    // editing clears only the edited field and returns to idle
    form.set_field(ProfileField::Phone, "1234567890");
    assert_eq!(form.error(ProfileField::Phone), None);
    assert!(form.error(ProfileField::Username).is_some());
    assert_eq!(form.state().phase(), FormPhase::Idle);

    form.set_field(ProfileField::Username, "johndoe");
    assert_eq!(form.submit(&api).await, SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn profile_form_merges_server_errors() -> Result<()> {
    fn rejected() -> Result<ApiReply, ClientError> {
        Ok(ApiReply {
            status: 400,
            body: ReplyBody {
                message: Some("Validation failed".to_string()),
                errors: Some([("email", "Must be a valid email format.")].into_iter().collect()),
                success: None,
            },
        })
    }

    let api = ScriptedApi::new(rejected);
    let mut form = filled_profile_form();

    assert_eq!(form.submit(&api).await, SubmitOutcome::Rejected);
    assert_eq!(form.state().phase(), FormPhase::Failed);
    assert_eq!(
        form.error(ProfileField::Email),
        Some("Must be a valid email format.")
    );
    assert!(!form.state().is_in_flight());
    Ok(())
}

#[tokio::test]
async fn profile_form_reports_transport_failure() -> Result<()> {
    let api = ScriptedApi::new(undecodable_reply);
    let mut form = filled_profile_form();

    assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
    assert_eq!(
        form.state().notice().map(|n| (n.kind, n.message.as_str())),
        Some((NoticeKind::Error, GENERIC_FAILURE))
    );

    form.dismiss_notice();
    assert_eq!(form.state().phase(), FormPhase::Idle);
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_generic_failure() -> Result<()> {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = HttpApi::new(&format!("http://{addr}"))?;
    let mut form = LoginForm::new();
    form.set_email("test@example.com");
    form.set_password("password123");

    assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
    assert_eq!(
        form.state().notice().map(|n| n.message.as_str()),
        Some(GENERIC_FAILURE)
    );
    Ok(())
}

#[tokio::test]
async fn abandoned_submit_does_not_block_the_next_one() -> Result<()> {
    let mut form = filled_profile_form();

    let timed_out = tokio::time::timeout(Duration::from_millis(20), form.submit(&HangingApi))
        .await
        .is_err();
    assert!(timed_out);
    assert!(form.state().is_submit_disabled());

    form.set_field(ProfileField::Username, "janedoe");
    form.dismiss_notice();

    let api = ScriptedApi::new(ok_reply);
    assert_eq!(form.submit(&api).await, SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 1);
    assert_eq!(form.state().phase(), FormPhase::Success);
    assert!(!form.state().is_submit_disabled());

    assert_eq!(form.submit(&api).await, SubmitOutcome::Succeeded);
    assert_eq!(api.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn login_form_accepts_fixed_pair() -> Result<()> {
    let api = spawn_server().await?;
    let mut form = LoginForm::new();
    form.set_email("test@example.com");
    form.set_password("password123");

    assert_eq!(form.submit(&api).await, SubmitOutcome::Succeeded);
    assert_eq!(
        form.state().notice().map(|n| (n.kind, n.message.as_str())),
        Some((NoticeKind::Success, "Login successful!"))
    );
    Ok(())
}

#[tokio::test]
async fn login_form_shows_invalid_credentials() -> Result<()> {
    let api = spawn_server().await?;
    let mut form = LoginForm::new();
    form.set_email("test@example.com");
    form.set_password("wrongpassword");

    assert_eq!(form.submit(&api).await, SubmitOutcome::Rejected);
    assert_eq!(
        form.state().notice().map(|n| (n.kind, n.message.as_str())),
        Some((NoticeKind::Error, "Invalid credentials."))
    );
    assert!(form.state().errors().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_form_validates_before_sending() -> Result<()> {
    let api = ScriptedApi::new(ok_reply);
    let mut form = LoginForm::new();

    assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);
    assert_eq!(form.email_error(), Some("Email is required."));
    assert_eq!(form.password_error(), Some("Password is required."));

    form.set_email("test@example.com");
    form.set_password("12345");
    assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);
    assert_eq!(form.email_error(), None);
    assert_eq!(
        form.password_error(),
        Some("Password must be at least 6 characters.")
    );
    assert_eq!(api.calls(), 0);
    Ok(())
}
