//! Local archive of extracted schedules.

use crate::error::Result;
use feedline_domain::{ScheduleDocument, ScheduleId, StoredSchedule};
use std::fs;
use std::path::{Path, PathBuf};

/// Schedules stored as a JSON array in one file.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    schedules: Vec<StoredSchedule>,
}

impl Archive {
    /// Load the archive at `path`; a missing file is an empty archive.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let schedules = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };

        tracing::debug!(path = %path.display(), schedules = schedules.len(), "Archive loaded");
        Ok(Self { path, schedules })
    }

    /// Write the archive back to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.schedules)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// File backing the archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Archived schedules, oldest first.
    pub fn schedules(&self) -> &[StoredSchedule] {
        &self.schedules
    }

    /// The schedule documents alone, for aggregation.
    pub fn documents(&self) -> impl Iterator<Item = &ScheduleDocument> {
        self.schedules.iter().map(|stored| &stored.schedule)
    }

    /// Add a schedule extracted from `document_ref` and return its id.
    pub fn add(
        &mut self,
        document_ref: impl Into<String>,
        schedule: ScheduleDocument,
    ) -> ScheduleId {
        let stored = StoredSchedule::new(document_ref, schedule);
        let id = stored.id;
        self.schedules.push(stored);
        id
    }

    /// Remove a schedule by id.
    pub fn remove(&mut self, id: &ScheduleId) -> Option<StoredSchedule> {
        let index = self.schedules.iter().position(|stored| &stored.id == id)?;
        Some(self.schedules.remove(index))
    }

    /// Number of archived schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// True when nothing is archived.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
