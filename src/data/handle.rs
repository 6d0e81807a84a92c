use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_movies, LoadError, LoadOptions};
use super::model::MovieDataset;

// ---------------------------------------------------------------------------
// Load-once dataset handle
// ---------------------------------------------------------------------------

struct Cached {
    dataset: Arc<MovieDataset>,
    modified: Option<SystemTime>,
}

/// Lazily loaded, read-only dataset.  The file is read on the first
/// [`get`](Self::get) and again only after its modification time changes or
/// [`invalidate`](Self::invalidate) is called.
pub struct DatasetHandle {
    path: PathBuf,
    options: LoadOptions,
    cached: Option<Cached>,
}

impl DatasetHandle {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point at another file.  The next `get` reads it.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// The dataset, reading the file only when nothing valid is cached.
    pub fn get(&mut self) -> Result<Arc<MovieDataset>, LoadError> {
        let modified = modification_time(&self.path);

        if let Some(cached) = &self.cached {
            if cached.modified == modified {
                return Ok(Arc::clone(&cached.dataset));
            }
            log::info!("{} changed on disk, reloading", self.path.display());
        }

        let dataset = match load_movies(&self.path, &self.options) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                self.cached = None;
                return Err(e);
            }
        };
        log::info!(
            "Loaded {} movies with columns {:?} from {}",
            dataset.len(),
            dataset.columns,
            self.path.display()
        );

        self.cached = Some(Cached {
            dataset: Arc::clone(&dataset),
            modified,
        });
        Ok(dataset)
    }
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
