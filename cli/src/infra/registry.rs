//! File-backed implementation of the `InstanceRegistry` port.
//!
//! The registry is a plain text file of `name:gateway:bridge` lines. A
//! sibling `<registry>.lock` file carries an advisory `flock`; every
//! read-modify-write sequence runs under it. Rewrites go through a temp
//! file in the same directory and a rename, so readers never observe a
//! half-written registry.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::application::ports::InstanceRegistry;
use crate::domain::instance::DEFAULT_INSTANCE;
use crate::domain::registry::{format_registry, parse_registry, without};
use crate::domain::{InstanceName, PortPair, RegistryError, RegistryRecord};

/// Registry stored at `path`.
pub struct FileRegistry {
    path: PathBuf,
    default_ports: PortPair,
}

/// Holds the registry `flock` until dropped.
#[derive(Debug)]
pub struct RegistryLock {
    _file: File,
}

impl FileRegistry {
    /// `default_ports` are written for the default record when it is missing.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, default_ports: PortPair) -> Self {
        Self {
            path: path.into(),
            default_ports,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn read_raw(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading registry {}", self.path.display())),
        }
    }

    fn rewrite(&self, records: &[RegistryRecord]) -> Result<()> {
        write_atomic(&self.path, format_registry(records).as_bytes())
    }
}

impl InstanceRegistry for FileRegistry {
    type Lock = RegistryLock;

    fn lock(&self) -> Result<RegistryLock> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("opening {}", lock_path.display()))?;
        file.lock_exclusive().map_err(|e| RegistryError::Lock {
            path: lock_path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::trace!(path = %lock_path.display(), "registry locked");
        Ok(RegistryLock { _file: file })
    }

    fn ensure(&self) -> Result<()> {
        let _lock = self.lock()?;
        let mut records = match self.read_raw()? {
            Some(content) => parse_registry(&content)?,
            None => Vec::new(),
        };
        if records.iter().any(|r| r.name == DEFAULT_INSTANCE) {
            return Ok(());
        }
        records.push(RegistryRecord::new(DEFAULT_INSTANCE, self.default_ports));
        self.rewrite(&records)?;
        tracing::info!(path = %self.path.display(), "registry initialised with default instance");
        Ok(())
    }

    fn records(&self) -> Result<Vec<RegistryRecord>> {
        match self.read_raw()? {
            Some(content) => Ok(parse_registry(&content)?),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, record: &RegistryRecord) -> Result<()> {
        let mut records = self.records()?;
        records.push(record.clone());
        self.rewrite(&records)
    }

    fn remove(&self, name: &InstanceName) -> Result<()> {
        let records = self.records()?;
        self.rewrite(&without(&records, name.as_str()))
    }
}

/// Replace `target` with `data` via a same-directory temp file and rename.
fn write_atomic(target: &Path, data: &[u8]) -> Result<()> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)
        .with_context(|| format!("creating directory {}", parent.display()))?;

    let temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("creating temp file in {}", parent.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
    }
    let mut file = temp.as_file();
    file.write_all(data)
        .with_context(|| format!("writing temp file for {}", target.display()))?;
    file.sync_all()
        .with_context(|| format!("syncing temp file for {}", target.display()))?;
    temp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("replacing {}", target.display()))?;
    Ok(())
}
