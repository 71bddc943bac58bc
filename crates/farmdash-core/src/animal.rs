//! Currently detected animal, persisted to a one-word text file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use farmdash_types::Animal;

use crate::error::{Error, Result};

/// File-backed animal selection.
#[derive(Debug, Clone)]
pub struct AnimalSelection {
    path: PathBuf,
}

impl AnimalSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the selection.
    pub fn set(&self, animal: Animal) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&self.path, animal.as_str()).map_err(|e| Error::io(&self.path, e))?;
        info!("Animal selection set to {}", animal);
        Ok(())
    }

    /// The current selection, or `None` if nothing has been set.
    pub fn get(&self) -> Result<Option<Animal>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.parse()?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }
}
