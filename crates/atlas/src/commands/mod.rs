//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod countries;
pub mod favourites;
pub mod protected;
pub mod util;
pub mod weather;

use tokio_util::sync::CancellationToken;

use atlas_core::Atlas;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a network-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    atlas: &Atlas,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Countries(args) => countries::handle(atlas, args, global, cancel).await,
        Command::Weather(args) => weather::handle(atlas, args, global, cancel).await,
        Command::Favourites(args) => favourites::handle(atlas, args, global, cancel).await,
        Command::Protected(args) => protected::handle(atlas, args, global, cancel).await,
        Command::Auth(args) => auth::handle(atlas, args, global, cancel).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Config {
            message: "command does not run against the network".into(),
        }),
    }
}
