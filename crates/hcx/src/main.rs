mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hcx_core::Orchestrator;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a connector
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hcx", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let hcx_config = config::build_hcx_config(&cli.global)?;
            let orchestrator = Orchestrator::new(hcx_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            tokio::select! {
                result = commands::dispatch(cmd, &orchestrator, &cli.global) => result,
                _ = tokio::signal::ctrl_c() => Err(CliError::Cancelled {
                    operation: "command".into(),
                }),
            }
        }
    }
}
