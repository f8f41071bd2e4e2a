//! `openclaw-manager destroy <name>`: unregister an instance, optionally
//! deleting its data.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::instance_destroy::{DestroyOptions, destroy_instance};
use crate::domain::{DestroyAnswers, DestroyOutcome};
use crate::infra::fs::LocalFs;

/// Arguments for the destroy command.
#[derive(Args)]
pub struct DestroyArgs {
    /// Instance name (`default` is protected)
    pub name: String,

    /// Delete the state directory without asking
    #[arg(long, conflicts_with = "keep_data")]
    pub delete_state: bool,

    /// Delete the workspace directory without asking
    #[arg(long, conflicts_with = "keep_data")]
    pub delete_workspace: bool,

    /// Keep both data directories without asking
    #[arg(long)]
    pub keep_data: bool,
}

impl DestroyArgs {
    /// Pre-supplied answers; `assume_yes` answers the initial confirmation.
    #[must_use]
    pub fn answers(&self, assume_yes: bool) -> DestroyAnswers {
        let dir_answer = |delete: bool| {
            if delete {
                Some(true)
            } else if self.keep_data {
                Some(false)
            } else {
                None
            }
        };
        DestroyAnswers {
            proceed: assume_yes.then_some(true),
            delete_state: dir_answer(self.delete_state),
            delete_workspace: dir_answer(self.delete_workspace),
        }
    }
}

/// Run `openclaw-manager destroy <name>`.
///
/// # Errors
///
/// Returns `Protected` for `default`, `NotFound` for unregistered names, or
/// the first failing teardown step's error.
pub async fn run(args: &DestroyArgs, app: &AppContext) -> Result<()> {
    let reporter = app.terminal_reporter();
    let outcome = destroy_instance(
        &app.registry,
        &app.systemctl,
        &LocalFs,
        app,
        DestroyOptions {
            layout: &app.config.layout(),
            reporter: &reporter,
            name: &args.name,
            answers: args.answers(app.assume_yes),
        },
    )
    .await?;

    if outcome == DestroyOutcome::Aborted {
        app.output.info("Cancelled. Nothing was changed.");
    }
    Ok(())
}
