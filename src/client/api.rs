//! HTTP client for the form endpoints. Controllers only depend on the
//! [`FormApi`] trait so they can be driven without a network in tests.

use super::ClientError;
use crate::{
    validation::{FieldErrors, LoginInput, ProfileInput},
    APP_USER_AGENT,
};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, instrument};
use url::Url;

pub const PROFILE_PATH: &str = "/api/profile";
pub const LOGIN_PATH: &str = "/api/login";

/// Decoded response of either endpoint, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl ApiReply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Union of the response bodies the endpoints produce.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub success: Option<bool>,
}

pub trait FormApi {
    fn update_profile(
        &self,
        input: &ProfileInput,
    ) -> impl Future<Output = Result<ApiReply, ClientError>> + Send;

    fn login(&self, input: &LoginInput)
        -> impl Future<Output = Result<ApiReply, ClientError>> + Send;
}

/// [`FormApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Url::parse(base_url)?;

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim().trim_start_matches('/')
        ))?)
    }

    async fn send(request: RequestBuilder) -> Result<ApiReply, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        debug!("API replied with {status}");

        let body = serde_json::from_slice(&bytes)
            .map_err(|source| ClientError::Decode { status, source })?;

        Ok(ApiReply { status, body })
    }
}

impl FormApi for HttpApi {
    #[instrument(skip_all)]
    async fn update_profile(&self, input: &ProfileInput) -> Result<ApiReply, ClientError> {
        let url = self.url(PROFILE_PATH)?;
        Self::send(self.client.put(url).json(input)).await
    }

    #[instrument(skip_all)]
    async fn login(&self, input: &LoginInput) -> Result<ApiReply, ClientError> {
        let url = self.url(LOGIN_PATH)?;
        Self::send(self.client.post(url).json(input)).await
    }
}
