//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod destroy;
pub mod error;
pub mod instance;
pub mod registry;
pub mod secret;
pub mod template;

pub use config::{ConfigFile, ManagerConfig};
pub use destroy::{DestroyAnswers, DestroyOutcome, DestroyQuestion};
pub use error::{ConfigError, InstanceError, RegistryError, TemplateError};
pub use instance::{InstanceName, InstancePaths, InstanceState, PathLayout, derive_paths};
pub use registry::{PortPair, RegistryRecord};
pub use template::{Template, TemplateField, TemplateKind, TemplateValues};
