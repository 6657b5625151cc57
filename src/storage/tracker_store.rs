use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use crate::fs::operations::{read_locked, write_locked};

use super::{
    entities::{CompletionRatio, Tracker, TrackerMap},
    Result, StoreError,
};

/// Location of the data file relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "deepwork_tracker_data.json";

/// Owns every tracker and the file they are persisted to. Mutations only change memory, callers
/// are expected to [save](TrackerStore::save) right after each one.
#[derive(Debug)]
pub struct TrackerStore {
    path: PathBuf,
    trackers: TrackerMap,
}

impl TrackerStore {
    /// Reads trackers from `path`. A missing file is a fresh start, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = read_locked(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let trackers = match contents {
            Some(contents) => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
                    path: path.clone(),
                    source,
                })?
            }
            None => {
                debug!("No data file at {path:?}, starting with no trackers");
                TrackerMap::new()
            }
        };

        info!("Loaded {} trackers from {path:?}", trackers.len());
        Ok(Self { path, trackers })
    }

    pub fn trackers(&self) -> &TrackerMap {
        &self.trackers
    }

    pub fn contains(&self, label: &str) -> bool {
        self.trackers.contains(label)
    }

    pub fn get(&self, label: &str) -> Option<&Tracker> {
        self.trackers.get(label)
    }

    pub fn list_labels(&self) -> Vec<&str> {
        self.trackers.labels().collect()
    }

    /// Creates a tracker with empty progress. A tracker with the same label is replaced wholesale
    /// and returned. Inputs are trusted: `days >= 1` and a non-empty `tasks` are checked by the
    /// creation flow.
    pub fn create_or_replace(
        &mut self,
        label: impl Into<String>,
        days: u32,
        tasks: Vec<String>,
    ) -> Option<Tracker> {
        let label = label.into();
        info!("Creating tracker {label:?} with {days} days and tasks {tasks:?}");
        self.trackers.insert(label, Tracker::new(days, tasks))
    }

    pub fn delete(&mut self, label: &str) -> Result<Tracker> {
        let removed = self
            .trackers
            .remove(label)
            .ok_or_else(|| StoreError::NotFound(label.to_owned()))?;
        info!("Deleted tracker {label:?}");
        Ok(removed)
    }

    /// Sets a single cell of the progress grid. The cell isn't checked against the tracker's days
    /// and tasks.
    pub fn set_progress(&mut self, label: &str, day: u32, task: &str, completed: bool) -> Result<()> {
        let tracker = self
            .trackers
            .get_mut(label)
            .ok_or_else(|| StoreError::NotFound(label.to_owned()))?;
        tracker.set(day, task, completed);
        debug!("Set {label:?} day {day} task {task:?} to {completed}");
        Ok(())
    }

    pub fn completion_ratio(&self, label: &str) -> Option<CompletionRatio> {
        self.trackers.get(label).map(Tracker::completion_ratio)
    }

    /// Rewrites the whole data file.
    pub fn save(&self) -> Result<()> {
        let buffer = self.encode()?;
        write_locked(&self.path, &buffer).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} trackers into {:?}", self.trackers.len(), self.path);
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.trackers
            .serialize(&mut serializer)
            .map_err(StoreError::Encode)?;
        Ok(buffer)
    }
}
