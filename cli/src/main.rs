//! openclaw-manager - run isolated OpenClaw gateway instances side by side

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use openclaw_manager::cli::Cli;
use openclaw_manager::domain::InstanceError;
use openclaw_manager::output::OutputContext;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "OPENCLAW_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose, cli.no_color);
    let no_color = cli.no_color;

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputContext::new(no_color, false).error(&format!("{e:#}"));
            exit_code_for(&e)
        }
    }
}

fn init_tracing(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

/// Forward a subprocess's own exit code; everything else is 1.
fn exit_code_for(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<InstanceError>() {
        Some(InstanceError::SubprocessFailure {
            code: Some(code), ..
        }) => u8::try_from(*code)
            .ok()
            .filter(|c| *c != 0)
            .map_or(ExitCode::FAILURE, ExitCode::from),
        _ => ExitCode::FAILURE,
    }
}
