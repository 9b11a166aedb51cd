//! Snapshot sinks: where result bundles are persisted.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::SinkError;

use super::bundle::ResultBundle;

/// Default snapshot file path, relative to the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "storage/esiti.json";

/// Human-readable description of where a bundle was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLocation(String);

impl SnapshotLocation {
    /// Create a location.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The location text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable home for the latest result bundle.
pub trait SnapshotSink: Send + Sync {
    /// Persist a bundle, replacing any previous one.
    fn store(&self, bundle: &ResultBundle) -> Result<SnapshotLocation, SinkError>;

    /// Load the most recently stored bundle, if any.
    fn load(&self) -> Result<Option<ResultBundle>, SinkError>;

    /// Where bundles are (or will be) stored.
    fn location(&self) -> SnapshotLocation;
}

/// Stores the bundle as pretty-printed JSON in a single file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never observe a partial file. Writers within the
/// process are serialized; across processes the last rename wins.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotSink for JsonFileSink {
    fn store(&self, bundle: &ResultBundle) -> Result<SnapshotLocation, SinkError> {
        let encoded = serde_json::to_vec_pretty(bundle)?;

        let _guard = self.write_lock.lock();
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), bytes = encoded.len(), "snapshot written");
        Ok(self.location())
    }

    fn load(&self) -> Result<Option<ResultBundle>, SinkError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn location(&self) -> SnapshotLocation {
        SnapshotLocation::new(self.path.display().to_string())
    }
}

/// Keeps the latest bundle in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    latest: RwLock<Option<ResultBundle>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSink for MemorySink {
    fn store(&self, bundle: &ResultBundle) -> Result<SnapshotLocation, SinkError> {
        *self.latest.write() = Some(bundle.clone());
        Ok(self.location())
    }

    fn load(&self) -> Result<Option<ResultBundle>, SinkError> {
        Ok(self.latest.read().clone())
    }

    fn location(&self) -> SnapshotLocation {
        SnapshotLocation::new("memory")
    }
}
