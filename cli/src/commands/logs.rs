//! `openclaw-manager logs <name> [lines]`: journal of one instance.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::instance_control::show_logs;

/// Default number of journal lines.
pub const DEFAULT_LOG_LINES: u32 = 50;

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// Instance name
    pub name: String,

    /// Number of trailing journal lines
    #[arg(default_value_t = DEFAULT_LOG_LINES)]
    pub lines: u32,

    /// Keep streaming new entries
    #[arg(short, long)]
    pub follow: bool,
}

/// Run `openclaw-manager logs`.
///
/// # Errors
///
/// Returns `NotFound` for unregistered names, or `SubprocessFailure` if
/// journalctl fails.
pub async fn run(args: &LogsArgs, app: &AppContext) -> Result<()> {
    show_logs(
        &app.registry,
        &app.systemctl,
        &app.config.layout(),
        &args.name,
        args.lines,
        args.follow,
    )
    .await
}
