//! Port registry records and the port allocator.
//!
//! The on-disk encoding is one `name:gateway:bridge` record per line. This
//! module owns that encoding and the allocation rule; reading, locking, and
//! writing the file belong to `crate::infra::registry`.

use std::fmt;

use crate::domain::error::{InstanceError, RegistryError};

/// A reserved (gateway, bridge) port pair. Bridge is always gateway + 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortPair {
    pub gateway: u16,
    pub bridge: u16,
}

impl PortPair {
    #[must_use]
    pub fn new(gateway: u16, bridge: u16) -> Self {
        Self { gateway, bridge }
    }
}

/// One registry line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub name: String,
    pub ports: PortPair,
}

impl RegistryRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, ports: PortPair) -> Self {
        Self {
            name: name.into(),
            ports,
        }
    }
}

impl fmt::Display for RegistryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.ports.gateway, self.ports.bridge)
    }
}

/// Decode registry file contents.
///
/// Blank lines and surrounding whitespace are ignored. Any other line that is
/// not `name:u16:u16` is an error, never silently dropped, because a later
/// rewrite would otherwise lose it.
///
/// # Errors
///
/// Returns [`RegistryError::Corrupt`] naming the first malformed line.
pub fn parse_registry(content: &str) -> Result<Vec<RegistryRecord>, RegistryError> {
    let mut records = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let corrupt = || RegistryError::Corrupt {
            line: idx + 1,
            content: line.to_string(),
        };
        let mut parts = line.split(':');
        let (Some(name), Some(gateway), Some(bridge), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(corrupt());
        };
        if name.is_empty() {
            return Err(corrupt());
        }
        let gateway = gateway.parse::<u16>().map_err(|_| corrupt())?;
        let bridge = bridge.parse::<u16>().map_err(|_| corrupt())?;
        records.push(RegistryRecord::new(name, PortPair::new(gateway, bridge)));
    }
    Ok(records)
}

/// Encode records as registry file contents, one per line, newline-terminated.
#[must_use]
pub fn format_registry(records: &[RegistryRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
}

/// First record named `name`.
#[must_use]
pub fn find<'a>(records: &'a [RegistryRecord], name: &str) -> Option<&'a RegistryRecord> {
    records.iter().find(|r| r.name == name)
}

/// All records except those named `name`, order preserved.
#[must_use]
pub fn without(records: &[RegistryRecord], name: &str) -> Vec<RegistryRecord> {
    records.iter().filter(|r| r.name != name).cloned().collect()
}

/// Compute the next port pair.
///
/// Next gateway = (highest gateway port in `records`, or `base_gateway` when
/// empty) + 2; next bridge = next gateway + 1. Ports freed by destroy are not
/// reused unless they were the current maximum.
///
/// # Errors
///
/// Returns [`InstanceError::PortsExhausted`] when the pair would overflow
/// the `u16` port range.
pub fn next_port_pair(records: &[RegistryRecord], base_gateway: u16) -> Result<PortPair, InstanceError> {
    let max = records
        .iter()
        .map(|r| r.ports.gateway)
        .max()
        .unwrap_or(base_gateway);
    let gateway = max
        .checked_add(2)
        .ok_or(InstanceError::PortsExhausted(max))?;
    let bridge = gateway
        .checked_add(1)
        .ok_or(InstanceError::PortsExhausted(max))?;
    Ok(PortPair::new(gateway, bridge))
}
