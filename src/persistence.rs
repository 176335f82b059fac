//! Persistence gateway.
//!
//! The engine loads one [`Snapshot`] at start-up and saves a full snapshot
//! after every successful mutation. Loading never fails: missing, empty or
//! malformed state is replaced by empty collections. Records are decoded one
//! at a time, so a single bad record is dropped without losing the rest.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::PersistenceError;
use crate::store::Snapshot;

pub const DEFAULT_STATE_DIR: &str = "timetable.state";
pub const DEFAULT_SNAPSHOT_FILE: &str = "timetable.json";

/// Loads and saves timetable snapshots.
pub trait PersistenceGateway {
    /// Returns the last saved snapshot, or an empty one.
    fn load(&self) -> Snapshot;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

/// Location of the on-disk snapshot.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub state_dir: PathBuf,
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_DIR)
    }
}

impl StoreConfig {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            file_name: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }

    /// Sets the snapshot file name inside the state directory.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join(&self.file_name)
    }

    fn temp_path(&self) -> PathBuf {
        self.state_dir.join(format!("{}.tmp", self.file_name))
    }

    pub fn ensure_dirs(&self) -> Result<(), PersistenceError> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir)?;
        }
        Ok(())
    }
}

/// Keeps the snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    snapshot: Snapshot,
    saves: usize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `snapshot` as the stored state.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot, saves: 0 }
    }

    /// The last saved (or seeded) snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Snapshot {
        self.snapshot.clone()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.snapshot = snapshot.clone();
        self.saves += 1;
        Ok(())
    }
}

/// Stores the snapshot as a pretty-printed JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the snapshot,
/// so readers see either the old or the new state in full.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    config: StoreConfig,
}

impl JsonFileGateway {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn read_snapshot(path: &Path) -> Result<Option<Snapshot>, PersistenceError> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let doc: Value = serde_json::from_slice(&bytes)?;
        Ok(Some(Snapshot {
            faculty: records(&doc, "faculty"),
            subjects: records(&doc, "subjects"),
            assignments: records(&doc, "assignments"),
        }))
    }
}

/// Decodes the array under `key`, skipping elements that fail to decode.
fn records<T: DeserializeOwned>(doc: &Value, key: &str) -> Vec<T> {
    match doc.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match T::deserialize(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("dropping unreadable {key} record #{idx}: {err}");
                    None
                }
            })
            .collect(),
        Some(_) => {
            warn!("dropping '{key}': expected an array");
            Vec::new()
        }
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load(&self) -> Snapshot {
        let path = self.config.snapshot_path();
        match Self::read_snapshot(&path) {
            Ok(Some(snapshot)) => {
                debug!(
                    "loaded timetable from {}: {} faculty, {} subjects, {} assignments",
                    path.display(),
                    snapshot.faculty.len(),
                    snapshot.subjects.len(),
                    snapshot.assignments.len()
                );
                snapshot
            }
            Ok(None) => {
                debug!("no timetable state at {}, starting empty", path.display());
                Snapshot::default()
            }
            Err(err) => {
                warn!(
                    "discarding unreadable timetable state at {}: {}",
                    path.display(),
                    err
                );
                Snapshot::default()
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.config.ensure_dirs()?;
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.config.temp_path();
        fs::write(&tmp, bytes)?;
        if let Err(err) = fs::rename(&tmp, self.config.snapshot_path()) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
