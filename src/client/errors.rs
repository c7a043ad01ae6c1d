use thiserror::Error;

/// Failures talking to the API. None of these carry a server verdict; a
/// response with an error status is an [`super::ApiReply`], not a `ClientError`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unable to reach the server: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode response ({status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
