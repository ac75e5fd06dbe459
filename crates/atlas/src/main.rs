mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use atlas_core::Atlas;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't touch the network
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "atlas", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config()?;
            config::apply_defaults(&mut cli.global, &cfg);
            let global = &cli.global;

            let profile_name = config::active_profile_name(global, &cfg);
            let blank = config::Profile::default();
            let profile = config::select_profile(global, &cfg, &profile_name)?.unwrap_or(&blank);
            let atlas_config = config::resolve_profile(profile, &profile_name, global, &cfg)?;

            let credentials = if cmd.needs_session() {
                if atlas_config.backend.is_none() {
                    return Err(CliError::NoBackend {
                        profile: profile_name,
                    });
                }
                Some(config::resolve_credentials(profile, &profile_name)?)
            } else {
                None
            };

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            tracing::debug!(command = ?cmd, profile = %profile_name, "dispatching command");
            let task_cancel = cancel.clone();
            Atlas::oneshot(atlas_config, credentials, &cancel, |atlas| async move {
                commands::dispatch(cmd, &atlas, global, &task_cancel).await
            })
            .await
            .map_err(|e: CliError| e.with_profile(&profile_name))
        }
    }
}
