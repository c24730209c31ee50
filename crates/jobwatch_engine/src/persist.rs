use std::fs;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use jobwatch_core::{ListingId, SeenSet};
use jobwatch_logging::{watch_error, watch_info, watch_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("state path has no file name: {0:?}")]
    InvalidPath(PathBuf),
    #[error("failed to encode state: {0}")]
    Encode(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the state directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // The rename replaces an existing file in one step.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    seen: Vec<String>,
}

/// On-disk home of the seen-set.
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file starts a bootstrap run. An unreadable one is logged and
    /// yields an empty set that is still treated as restored.
    pub fn load(&self) -> SeenSet {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                watch_info!("No seen-set at {:?}; this run is a bootstrap", self.path);
                return SeenSet::fresh();
            }
            Err(err) => {
                watch_warn!("Failed to read seen-set from {:?}: {}", self.path, err);
                return SeenSet::restored(Vec::new());
            }
        };

        let state: PersistedState = match ron::from_str(&content) {
            Ok(state) => state,
            Err(err) => {
                watch_warn!("Failed to parse seen-set from {:?}: {}", self.path, err);
                return SeenSet::restored(Vec::new());
            }
        };

        let seen = SeenSet::restored(state.seen.into_iter().map(ListingId::new));
        watch_info!("Loaded {} seen listings from {:?}", seen.len(), self.path);
        seen
    }

    /// Overwrites the file with the whole set, ids in ascending order.
    pub fn save(&self, seen: &SeenSet) -> Result<(), PersistError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::InvalidPath(self.path.clone()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let state = PersistedState {
            seen: seen.iter().map(|id| id.as_str().to_string()).collect(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)?;

        AtomicFileWriter::new(dir).write(filename, &content)?;
        watch_info!("Saved {} seen listings to {:?}", seen.len(), self.path);
        Ok(())
    }
}

/// Seen-set bound to its store for the length of a run.
///
/// The set is written back exactly once: by [`SeenGuard::finish`], or on drop
/// when the run left early or panicked.
pub struct SeenGuard {
    store: SeenStore,
    seen: SeenSet,
    saved: bool,
}

impl SeenGuard {
    pub fn acquire(store: SeenStore) -> Self {
        let seen = store.load();
        Self {
            store,
            seen,
            saved: false,
        }
    }

    pub fn finish(mut self) -> Result<(), PersistError> {
        self.saved = true;
        self.store.save(&self.seen)
    }
}

impl Deref for SeenGuard {
    type Target = SeenSet;

    fn deref(&self) -> &SeenSet {
        &self.seen
    }
}

impl DerefMut for SeenGuard {
    fn deref_mut(&mut self) -> &mut SeenSet {
        &mut self.seen
    }
}

impl Drop for SeenGuard {
    fn drop(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        if let Err(err) = self.store.save(&self.seen) {
            watch_error!(
                "Failed to write seen-set to {:?}: {}",
                self.store.path(),
                err
            );
        }
    }
}
