//! Progress store adapters.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Checkpoint, ProgressStore};
use crate::error::CoreResult;

/// Keeps the last checkpoint in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    last: Option<Checkpoint>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a checkpoint.
    pub fn with_checkpoint(checkpoint: Checkpoint) -> Self {
        Self {
            last: Some(checkpoint),
        }
    }

    /// The last saved checkpoint.
    pub fn last(&self) -> Option<Checkpoint> {
        self.last
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> CoreResult<Option<Checkpoint>> {
        Ok(self.last)
    }

    fn save(&mut self, checkpoint: &Checkpoint) -> CoreResult<()> {
        self.last = Some(*checkpoint);
        Ok(())
    }
}

/// Stores the checkpoint as a JSON file.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write leaves the previous checkpoint intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the checkpoint file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file name>.tmp` next to the checkpoint file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("progress"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> CoreResult<Option<Checkpoint>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let checkpoint = serde_json::from_str(&raw)?;
        Ok(Some(checkpoint))
    }

    fn save(&mut self, checkpoint: &Checkpoint) -> CoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(checkpoint)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
