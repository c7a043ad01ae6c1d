//! Maps parsed command-line arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{ARG_FRONTEND_ORIGIN, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let frontend_origin = matches
        .get_one::<String>(ARG_FRONTEND_ORIGIN)
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty());

    Ok(Action::Server(Args {
        port,
        frontend_origin,
    }))
}
