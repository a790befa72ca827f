//! services/cli/src/adapters/file_storage.rs
//!
//! A `BlobStorage` that keeps each key in its own JSON file under a directory.
//! Values are written to a temporary file and renamed into place, so a reader
//! never sees a half-written document.

use commitly_core::ports::{BlobStorage, PortError, PortResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStorage for FileStorage {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PortError::Storage(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| PortError::Storage(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| PortError::Storage(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = value.len(), "Blob written");
        Ok(())
    }
}
