//! Infrastructure implementation of the `TemplateSource` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::TemplateSource;
use crate::domain::{InstanceError, TemplateKind};

/// Templates read from a directory, one file per [`TemplateKind`].
pub struct DirTemplates {
    dir: PathBuf,
}

impl DirTemplates {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateSource for DirTemplates {
    fn load(&self, kind: TemplateKind) -> Result<String> {
        let path = self.dir.join(kind.file_name());
        if !path.is_file() {
            return Err(InstanceError::TemplateMissing {
                path: path.display().to_string(),
            }
            .into());
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("reading template {}", path.display()))
    }
}
