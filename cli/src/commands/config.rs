//! `openclaw-manager config <name>`: print or edit an instance's gateway config.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{CommandRunner, LocalFs as _};
use crate::application::services::ensure_success;
use crate::application::services::instance_query::resolve_config_file;
use crate::infra::fs::LocalFs;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Instance name
    pub name: String,

    /// Print the file even on a terminal
    #[arg(long)]
    pub print: bool,
}

/// Run `openclaw-manager config <name>`.
///
/// Opens `$VISUAL` / `$EDITOR` when stdout is a terminal; prints otherwise.
///
/// # Errors
///
/// Returns `NotFound` for unregistered names, an error when the config file
/// is missing, or `SubprocessFailure` if the editor exits non-zero.
pub async fn run(args: &ConfigArgs, app: &AppContext) -> Result<()> {
    let path = resolve_config_file(&app.registry, &LocalFs, &app.config.layout(), &args.name)?;

    let editor = if args.print || !app.output.is_tty {
        None
    } else {
        editor_command(|key| std::env::var(key).ok())
    };
    if let Some(editor) = editor {
        let (program, extra) = editor
            .split_first()
            .context("editor command is empty")?;
        let path_arg = path.to_string_lossy();
        let mut editor_args: Vec<&str> = extra.iter().map(String::as_str).collect();
        editor_args.push(&path_arg);
        let status = app.runner.run_status(program, &editor_args).await?;
        return ensure_success(program, status);
    }

    print!("{}", LocalFs.read_to_string(&path)?);
    Ok(())
}

/// `$VISUAL`, else `$EDITOR`, split on whitespace. `None` when neither is set.
fn editor_command(env: impl Fn(&str) -> Option<String>) -> Option<Vec<String>> {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(env)
        .map(|raw| raw.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .find(|words| !words.is_empty())
}
