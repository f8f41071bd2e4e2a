//! Per-invocation state: resolved config plus the concrete adapters.
//!
//! `Cli::run()` builds one `AppContext` after the identity check and hands it
//! to the subcommand handler.

use anyhow::Result;

use crate::application::ports::Confirmer;
use crate::domain::{ManagerConfig, PortPair};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::podman::Podman;
use crate::infra::registry::FileRegistry;
use crate::infra::systemd::Systemctl;
use crate::infra::templates::DirTemplates;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// How query results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Global flags shared by every subcommand.
#[allow(clippy::struct_excessive_bools)]
pub struct GlobalFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
    /// Accept the initial destroy confirmation and prompt defaults.
    pub yes: bool,
}

/// Adapters and settings for one manager invocation.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Resolved manager configuration.
    pub config: ManagerConfig,
    /// Port registry file.
    pub registry: FileRegistry,
    /// `systemctl --user` / `journalctl --user` adapter.
    pub systemctl: Systemctl<TokioCommandRunner>,
    /// `podman` adapter.
    pub podman: Podman<TokioCommandRunner>,
    /// Template directory.
    pub templates: DirTemplates,
    /// Runner for interactive children such as the operator's editor.
    pub runner: TokioCommandRunner,
    /// `--yes` was passed.
    pub assume_yes: bool,
    /// When `true`, unanswered prompts take their default instead of asking.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `OPENCLAW_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Wire the production adapters for `config`.
    #[must_use]
    pub fn new(flags: &GlobalFlags, config: ManagerConfig) -> Self {
        let unattended = ["CI", "OPENCLAW_YES"]
            .iter()
            .any(|key| std::env::var_os(key).is_some());

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let registry = FileRegistry::new(
            config.registry_path.clone(),
            PortPair::new(config.default_gateway_port, config.default_bridge_port),
        );

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            registry,
            systemctl: Systemctl::default_runner(),
            podman: Podman::default_runner(),
            templates: DirTemplates::new(config.template_dir.clone()),
            runner: TokioCommandRunner::default(),
            config,
            assume_yes: flags.yes,
            non_interactive: flags.yes || unattended,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress reporter for application services.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

impl Confirmer for AppContext {
    /// Unattended runs take `default` without prompting.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
