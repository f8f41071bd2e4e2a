//! Infrastructure implementation of the `ContainerInspector` port.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use openclaw_common::ContainerRuntime;
use serde::Deserialize;

use crate::application::ports::{CommandRunner, ContainerInspector};
use crate::infra::command_runner::TokioCommandRunner;

/// Container engine adapter backed by the `podman` CLI.
pub struct Podman<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Podman<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl Podman<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> ContainerInspector for Podman<R> {
    async fn inspect(&self, container: &str) -> Result<Option<ContainerRuntime>> {
        let output = self
            .runner
            .run("podman", &["container", "inspect", "--format", "json", container])
            .await
            .with_context(|| format!("podman container inspect {container}"))?;
        // Non-zero means "no such container"; podman has no distinct code for it.
        if !output.status.success() {
            tracing::debug!(
                container,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "container not inspectable"
            );
            return Ok(None);
        }
        parse_inspect(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    id: String,
    #[serde(default)]
    image_name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    state: InspectState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectState {
    status: String,
    #[serde(default)]
    started_at: Option<String>,
}

/// Decode `podman container inspect --format json` output.
///
/// # Errors
///
/// Returns an error if the output is not the expected JSON array.
pub fn parse_inspect(json: &str) -> Result<Option<ContainerRuntime>> {
    let entries: Vec<InspectEntry> =
        serde_json::from_str(json).context("parsing podman inspect output")?;
    Ok(entries.into_iter().next().map(|entry| ContainerRuntime {
        id: entry.id,
        image: entry.image_name.or(entry.image).unwrap_or_default(),
        status: entry.state.status,
        started_at: entry.state.started_at.as_deref().and_then(parse_started_at),
    }))
}

/// Podman reports a never-started container as year 1.
fn parse_started_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
        .filter(|t| t.year() > 1)
}
