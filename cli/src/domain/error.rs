//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Instance errors ───────────────────────────────────────────────────────────

/// Errors related to instance identity and lifecycle.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error(
        "Invalid instance name '{0}': must match ^[a-z0-9]([a-z0-9-]*[a-z0-9])?$ and not be 'default'"
    )]
    InvalidName(String),

    #[error("Instance '{0}' already exists. Remove it first: openclaw-manager destroy {0}")]
    AlreadyExists(String),

    #[error("Instance '{0}' not found. See: openclaw-manager list")]
    NotFound(String),

    #[error("Instance '{0}' is protected and cannot be {1}.")]
    Protected(String, &'static str),

    #[error("Template not found: {path}")]
    TemplateMissing { path: String },

    #[error("Must run as '{expected}' (currently '{actual}').")]
    WrongIdentity { expected: String, actual: String },

    #[error("{program} failed{}", .code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    SubprocessFailure { program: String, code: Option<i32> },

    #[error("No ports left: next gateway port after {0} would exceed 65534")]
    PortsExhausted(u16),
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised while decoding or locking the port registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Corrupt registry entry on line {line}: '{content}' (expected name:gateway:bridge)")]
    Corrupt { line: usize, content: String },

    #[error("Could not lock registry {path}: {reason}")]
    Lock { path: String, reason: String },
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors raised while parsing or rendering a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown placeholder {{{{{0}}}}} in {1} template")]
    UnknownPlaceholder(String, &'static str),

    #[error("No value supplied for {{{{{0}}}}} in {1} template")]
    MissingValue(&'static str, &'static str),

    #[error("Unterminated placeholder at byte {0} in {1} template")]
    Unterminated(usize, &'static str),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to manager configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot determine home directory. Set OPENCLAW_HOME.")]
    NoHome,
}
