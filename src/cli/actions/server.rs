use crate::{api, cli::telemetry};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub port: u16,
    pub frontend_origin: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to bind or serve.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Starting server with {:?}", args);

    let result = api::new(args.port, args.frontend_origin.as_deref()).await;

    telemetry::shutdown_tracer();

    result
}
