//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::Result;
use openclaw_common::ContainerRuntime;

use crate::domain::{InstanceName, PortPair, RegistryRecord, TemplateKind};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output, bounded by the runner's
    /// query timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with inherited stdio and no timeout; returns only its
    /// exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// Per-user service manager operations on one unit.
///
/// Mutating calls return the manager's own exit status unchanged; callers
/// decide what a non-zero status means.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    async fn start(&self, service: &str) -> Result<ExitStatus>;
    async fn stop(&self, service: &str) -> Result<ExitStatus>;
    async fn restart(&self, service: &str) -> Result<ExitStatus>;
    /// `true` when the unit is active.
    async fn is_active(&self, service: &str) -> Result<bool>;
    /// `true` when the unit is in the failed state.
    async fn is_failed(&self, service: &str) -> Result<bool>;
    /// Re-read unit files (quadlet generator included).
    async fn daemon_reload(&self) -> Result<ExitStatus>;
    /// Stream the unit's journal to the terminal.
    async fn journal(&self, service: &str, lines: u32, follow: bool) -> Result<ExitStatus>;
}

// ── Container Engine Port ─────────────────────────────────────────────────────

/// Read-only container engine queries.
#[allow(async_fn_in_trait)]
pub trait ContainerInspector {
    /// Live runtime fields, or `None` when the container does not exist.
    async fn inspect(&self, container: &str) -> Result<Option<ContainerRuntime>>;
}

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Durable name → port-pair store. "Registered" is the definition of
/// "exists"; on-disk directories and unit files are not consulted.
///
/// The store performs no duplicate check on `append`. Callers serialise
/// read-modify-write sequences by holding the guard returned from `lock`.
pub trait InstanceRegistry {
    /// Exclusive lock held for as long as the value lives.
    type Lock;

    /// Take the exclusive registry lock, blocking until available.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be opened or locked.
    fn lock(&self) -> Result<Self::Lock>;

    /// Create the registry with the default record, or add the default
    /// record if missing. Idempotent. Takes the lock itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read or written.
    fn ensure(&self) -> Result<()>;

    /// All records, file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read or is corrupt.
    fn records(&self) -> Result<Vec<RegistryRecord>>;

    /// Add one record at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be written.
    fn append(&self, record: &RegistryRecord) -> Result<()>;

    /// Atomically rewrite the registry without any record for `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read or replaced.
    fn remove(&self, name: &InstanceName) -> Result<()>;

    /// Ports of the first record named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn lookup(&self, name: &InstanceName) -> Result<Option<PortPair>> {
        let records = self.records()?;
        Ok(crate::domain::registry::find(&records, name.as_str()).map(|r| r.ports))
    }

    /// `true` iff a record's name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn exists(&self, name: &InstanceName) -> Result<bool> {
        Ok(self.lookup(name)?.is_some())
    }
}

// ── Template Port ─────────────────────────────────────────────────────────────

/// Loads raw template text.
pub trait TemplateSource {
    /// Raw text of the template for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `InstanceError::TemplateMissing` when the file is absent.
    fn load(&self, kind: TemplateKind) -> Result<String>;
}

// ── Secrets Port ──────────────────────────────────────────────────────────────

/// Source of fresh gateway tokens.
pub trait TokenSource {
    /// A new random token, lowercase hex.
    fn generate(&self) -> String;
}

// ── Identity Port ─────────────────────────────────────────────────────────────

/// Resolves the user this process runs as.
pub trait IdentityProbe {
    /// Login name of the effective user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user database has no entry for the uid.
    fn current_user(&self) -> Result<String>;
}

// ── Interaction Port ──────────────────────────────────────────────────────────

/// Yes/no questions to the operator.
pub trait Confirmer {
    /// Ask `prompt`; `default` is the answer on a bare Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Local filesystem operations used by the lifecycle services.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// # Errors
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// # Errors
    /// Returns an error if permissions cannot be set.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}
