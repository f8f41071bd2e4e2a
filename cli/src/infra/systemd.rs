//! Infrastructure implementation of the `ServiceManager` port.
//!
//! `Systemctl<R>` routes every `systemctl --user` and `journalctl --user`
//! call through a `CommandRunner`. Mutating calls inherit stdio so the
//! operator sees systemd's own messages; state queries are captured and
//! bounded by the runner's timeout.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::infra::command_runner::TokioCommandRunner;

/// Service manager adapter generic over `R: CommandRunner` so tests can
/// inject a mock runner without spawning real processes.
pub struct Systemctl<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Systemctl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn user_unit(&self, verb: &str, service: &str) -> Result<ExitStatus> {
        self.runner
            .run_status("systemctl", &["--user", verb, service])
            .await
            .with_context(|| format!("systemctl --user {verb} {service}"))
    }

    /// `systemctl --user <verb> --quiet <service>` exits 0 iff the predicate holds.
    async fn query(&self, verb: &str, service: &str) -> Result<bool> {
        let output = self
            .runner
            .run("systemctl", &["--user", verb, "--quiet", service])
            .await
            .with_context(|| format!("systemctl --user {verb} {service}"))?;
        Ok(output.status.success())
    }
}

impl Systemctl<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> ServiceManager for Systemctl<R> {
    async fn start(&self, service: &str) -> Result<ExitStatus> {
        self.user_unit("start", service).await
    }

    async fn stop(&self, service: &str) -> Result<ExitStatus> {
        self.user_unit("stop", service).await
    }

    async fn restart(&self, service: &str) -> Result<ExitStatus> {
        self.user_unit("restart", service).await
    }

    async fn is_active(&self, service: &str) -> Result<bool> {
        self.query("is-active", service).await
    }

    async fn is_failed(&self, service: &str) -> Result<bool> {
        self.query("is-failed", service).await
    }

    async fn daemon_reload(&self) -> Result<ExitStatus> {
        self.runner
            .run_status("systemctl", &["--user", "daemon-reload"])
            .await
            .context("systemctl --user daemon-reload")
    }

    async fn journal(&self, service: &str, lines: u32, follow: bool) -> Result<ExitStatus> {
        let lines = lines.to_string();
        let mut args = vec!["--user", "-u", service, "-n", lines.as_str(), "--no-pager"];
        if follow {
            args.push("-f");
        }
        self.runner
            .run_status("journalctl", &args)
            .await
            .with_context(|| format!("journalctl --user -u {service}"))
    }
}
