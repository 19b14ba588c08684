//! JSON file storage for events.
//!
//! The whole collection lives in one file as a pretty-printed JSON array.
//! Saves go through a temp file and a rename so a crash never leaves a
//! half-written collection behind.

use neuron_core::{CalendarError, CalendarResult, Event, Store};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for JsonFileStore {
    /// A missing or empty file is an empty collection. Unreadable or
    /// malformed content is an error.
    fn load(&self) -> CalendarResult<Vec<Event>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no events file yet");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CalendarError::Persistence(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            CalendarError::Persistence(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&mut self, events: &[Event]) -> CalendarResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Persistence(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| CalendarError::Persistence(format!("Failed to serialize events: {e}")))?;

        let temp = self.temp_path();
        std::fs::write(&temp, content).map_err(|e| {
            CalendarError::Persistence(format!("Failed to write {}: {e}", temp.display()))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            CalendarError::Persistence(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), count = events.len(), "events saved");
        Ok(())
    }
}
