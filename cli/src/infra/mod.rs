//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, systemd
//! and podman access, the registry file, templates, and identity lookup.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod fs;
pub mod identity;
pub mod podman;
pub mod registry;
pub mod systemd;
pub mod templates;
pub mod token;
