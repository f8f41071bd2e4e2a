//! Shared mock infrastructure for unit tests.
//!
//! Service-manager, container, prompt, and token mocks are hand-written;
//! the registry and filesystem are the real adapters pointed at a temp home.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::Result;
use openclaw_common::ContainerRuntime;
use openclaw_manager::application::ports::{
    Confirmer, ContainerInspector, ProgressReporter, ServiceManager, TemplateSource, TokenSource,
};
use openclaw_manager::domain::{ConfigFile, ManagerConfig, PortPair, TemplateKind};
use openclaw_manager::infra::registry::FileRegistry;
use tempfile::TempDir;

// ── Exit status helpers ──────────────────────────────────────────────────────

/// Build an `ExitStatus` from a logical exit code.
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15.
pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

// ── Temp home ────────────────────────────────────────────────────────────────

/// A throwaway home directory with config and registry rooted in it.
pub struct TestHome {
    pub dir: TempDir,
    pub config: ManagerConfig,
    pub registry: FileRegistry,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_path_buf();
        let config = ManagerConfig::resolve(|_| None, ConfigFile::default(), Some(home)).unwrap();
        let registry = FileRegistry::new(
            config.registry_path.clone(),
            PortPair::new(config.default_gateway_port, config.default_bridge_port),
        );
        Self {
            dir,
            config,
            registry,
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn registry_text(&self) -> String {
        std::fs::read_to_string(&self.config.registry_path).unwrap_or_default()
    }
}

// ── Service manager ──────────────────────────────────────────────────────────

/// Records every call; tracks which units are active or failed.
#[derive(Default)]
pub struct MockServices {
    pub calls: RefCell<Vec<String>>,
    pub active: RefCell<HashSet<String>>,
    pub failed: RefCell<HashSet<String>>,
    /// Exit code returned by start/stop/restart/daemon-reload/journal.
    pub exit_code: Cell<i32>,
    /// When set, state queries fail as if systemctl could not be spawned.
    pub queries_fail: Cell<bool>,
}

impl MockServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(self, service: &str) -> Self {
        self.active.borrow_mut().insert(service.to_string());
        self
    }

    pub fn with_failed(self, service: &str) -> Self {
        self.failed.borrow_mut().insert(service.to_string());
        self
    }

    pub fn failing_with(self, code: i32) -> Self {
        self.exit_code.set(code);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> ExitStatus {
        self.calls.borrow_mut().push(call);
        exit_status(self.exit_code.get())
    }
}

impl ServiceManager for MockServices {
    async fn start(&self, service: &str) -> Result<ExitStatus> {
        let status = self.record(format!("start {service}"));
        if status.success() {
            self.active.borrow_mut().insert(service.to_string());
        }
        Ok(status)
    }

    async fn stop(&self, service: &str) -> Result<ExitStatus> {
        let status = self.record(format!("stop {service}"));
        if status.success() {
            self.active.borrow_mut().remove(service);
        }
        Ok(status)
    }

    async fn restart(&self, service: &str) -> Result<ExitStatus> {
        Ok(self.record(format!("restart {service}")))
    }

    async fn is_active(&self, service: &str) -> Result<bool> {
        if self.queries_fail.get() {
            anyhow::bail!("failed to spawn systemctl");
        }
        Ok(self.active.borrow().contains(service))
    }

    async fn is_failed(&self, service: &str) -> Result<bool> {
        if self.queries_fail.get() {
            anyhow::bail!("failed to spawn systemctl");
        }
        Ok(self.failed.borrow().contains(service))
    }

    async fn daemon_reload(&self) -> Result<ExitStatus> {
        Ok(self.record("daemon-reload".to_string()))
    }

    async fn journal(&self, service: &str, lines: u32, follow: bool) -> Result<ExitStatus> {
        Ok(self.record(format!("journal {service} {lines} {follow}")))
    }
}

// ── Container engine ─────────────────────────────────────────────────────────

pub enum MockContainers {
    Absent,
    Present(ContainerRuntime),
    Broken,
}

impl ContainerInspector for MockContainers {
    async fn inspect(&self, _container: &str) -> Result<Option<ContainerRuntime>> {
        match self {
            MockContainers::Absent => Ok(None),
            MockContainers::Present(rt) => Ok(Some(rt.clone())),
            MockContainers::Broken => anyhow::bail!("podman timed out after 30s"),
        }
    }
}

// ── Prompts ──────────────────────────────────────────────────────────────────

/// Answers prompts from a queue; an unexpected prompt is an error.
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            prompts: RefCell::default(),
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {prompt}"))
    }
}

// ── Tokens ───────────────────────────────────────────────────────────────────

pub struct FixedTokens;

pub const FIXED_TOKEN: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

impl TokenSource for FixedTokens {
    fn generate(&self) -> String {
        FIXED_TOKEN.to_string()
    }
}

// ── Templates ────────────────────────────────────────────────────────────────

pub const UNIT_TEMPLATE: &str = "\
[Container]
ContainerName=openclaw-{{NAME}}
Image={{IMAGE}}
UserNS={{USER_MAPPING}}
EnvironmentFile={{STATE_DIR}}/.env
Volume={{STATE_DIR}}:/home/node/.openclaw
Volume={{WORKSPACE_DIR}}:/home/node/workspace
Volume={{SHARED_SKILLS_DIR}}:/home/node/shared-skills:ro
PublishPort=127.0.0.1:{{GATEWAY_PORT}}:{{GATEWAY_PORT}}
PublishPort=127.0.0.1:{{BRIDGE_PORT}}:{{BRIDGE_PORT}}
DNS={{DNS_PRIMARY}}
DNS={{DNS_FALLBACK}}
PodmanArgs=--memory={{MEMORY}} --cpus={{CPUS}}
";

pub const CONFIG_TEMPLATE: &str =
    "{ \"gateway\": { \"port\": {{GATEWAY_PORT}} }, \"bridge\": { \"port\": {{BRIDGE_PORT}} } }\n";

/// In-memory templates; `None` means the file is missing.
pub struct MemTemplates {
    pub unit: Option<String>,
    pub config: Option<String>,
}

impl MemTemplates {
    pub fn standard() -> Self {
        Self {
            unit: Some(UNIT_TEMPLATE.to_string()),
            config: Some(CONFIG_TEMPLATE.to_string()),
        }
    }
}

impl TemplateSource for MemTemplates {
    fn load(&self, kind: TemplateKind) -> Result<String> {
        let text = match kind {
            TemplateKind::Unit => &self.unit,
            TemplateKind::Config => &self.config,
        };
        text.clone().ok_or_else(|| {
            openclaw_manager::domain::InstanceError::TemplateMissing {
                path: kind.file_name().to_string(),
            }
            .into()
        })
    }
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub lines: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|l| l.strip_prefix("warn: ").map(str::to_string))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.lines.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.lines.borrow_mut().push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(format!("warn: {message}"));
    }
}
