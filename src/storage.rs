//! # Storage Module
//!
//! Abstracts the storage primitives the generation engine needs (text read,
//! text write, recursive directory creation, and recursive tree removal)
//! behind the [`Storage`] trait, so the engine never talks to the
//! filesystem directly.
//!
//! Three backends are provided:
//!
//! - **[`FsStorage`]** - the real filesystem, used by the CLI.
//! - **[`MemStorage`]** - an in-memory map, used by tests and by integrators
//!   that want to capture output without touching disk (e.g. to stream it
//!   into an archive).
//! - **[`RecordingStorage`]** - forwards reads to an inner backend and
//!   captures writes in memory; powers the CLI's `--dry-run` mode.
//!
//! The backend is injected into the engine explicitly; there is no
//! process-wide default.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Error;

/// Storage capabilities required by the generation engine.
///
/// All methods take `&self`; backends needing mutation use interior
/// mutability so a single instance can be shared behind an `Arc`.
pub trait Storage: Send + Sync {
    /// Read a UTF-8 text file. Fails with [`Error::Storage`] carrying
    /// `io::ErrorKind::NotFound` when the file is missing.
    fn read_text(&self, path: &Path) -> Result<String, Error>;

    /// Create or overwrite a text file. The parent directory is assumed to
    /// already exist.
    fn write_text(&self, path: &Path, content: &str) -> Result<(), Error>;

    /// Recursively create a directory. Idempotent.
    fn ensure_dir(&self, path: &Path) -> Result<(), Error>;

    /// Synchronous variant of [`Storage::ensure_dir`], used when directory
    /// creation must complete before any write in the same pass. Blocking
    /// backends implement both identically.
    fn ensure_dir_sync(&self, path: &Path) -> Result<(), Error> {
        self.ensure_dir(path)
    }

    /// Recursively delete the *contents* of a directory without deleting the
    /// directory itself. A missing directory is not an error.
    fn remove_tree(&self, path: &Path) -> Result<(), Error>;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Real-filesystem backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_text(&self, path: &Path) -> Result<String, Error> {
        fs::read_to_string(path).map_err(|e| Error::storage(path, e))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), Error> {
        fs::write(path, content).map_err(|e| Error::storage(path, e))
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), Error> {
        fs::create_dir_all(path).map_err(|e| Error::storage(path, e))
    }

    fn remove_tree(&self, path: &Path) -> Result<(), Error> {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::storage(path, e)),
        };
        for entry in entries {
            let entry = entry.map_err(|e| Error::storage(path, e))?;
            let child = entry.path();
            let is_dir = entry
                .file_type()
                .map_err(|e| Error::storage(&child, e))?
                .is_dir();
            if is_dir {
                fs::remove_dir_all(&child).map_err(|e| Error::storage(&child, e))?;
            } else {
                fs::remove_file(&child).map_err(|e| Error::storage(&child, e))?;
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory backend: files are a path → text map, directories a path set.
///
/// Useful for tests and for capturing a whole generated tree without any
/// filesystem side effects.
#[derive(Debug, Default)]
pub struct MemStorage {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a file, e.g. a template the engine will read.
    pub fn seed(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), content.into());
    }

    /// Snapshot of every stored file.
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Content of a single file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path.as_ref())
            .cloned()
    }
}

impl Storage for MemStorage {
    fn read_text(&self, path: &Path) -> Result<String, Error> {
        self.get(path).ok_or_else(|| {
            Error::storage(path, io::Error::new(io::ErrorKind::NotFound, "no such file"))
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), Error> {
        self.seed(path, content);
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), Error> {
        self.dirs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf());
        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> Result<(), Error> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|p, _| !p.starts_with(path));
        self.dirs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|p| !(p.starts_with(path) && p != path));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        if files.contains_key(path) {
            return true;
        }
        let dirs = self.dirs.lock().unwrap_or_else(|e| e.into_inner());
        dirs.contains(path)
    }
}

/// Dry-run backend: reads fall through to the inner backend, writes and
/// directory operations are captured in memory and never reach it.
pub struct RecordingStorage<S> {
    inner: S,
    writes: Mutex<BTreeMap<PathBuf, String>>,
    removed: Mutex<Vec<PathBuf>>,
}

impl<S: Storage> RecordingStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            writes: Mutex::new(BTreeMap::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    /// Every write captured so far, in path order.
    pub fn writes(&self) -> BTreeMap<PathBuf, String> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl<S: Storage> Storage for RecordingStorage<S> {
    fn read_text(&self, path: &Path) -> Result<String, Error> {
        let writes = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(content) = writes.get(path) {
            return Ok(content.clone());
        }
        drop(writes);
        self.inner.read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), Error> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn ensure_dir(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> Result<(), Error> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|p, _| !p.starts_with(path));
        self.removed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let writes = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        if writes.contains_key(path) {
            return true;
        }
        drop(writes);
        let removed = self.removed.lock().unwrap_or_else(|e| e.into_inner());
        if removed.iter().any(|root| path.starts_with(root)) {
            return false;
        }
        drop(removed);
        self.inner.exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_storage_round_trip() {
        let storage = MemStorage::new();
        storage
            .write_text(Path::new("out/a.txt"), "hello")
            .unwrap();
        assert_eq!(storage.read_text(Path::new("out/a.txt")).unwrap(), "hello");
        assert!(storage.exists(Path::new("out/a.txt")));
        assert!(!storage.exists(Path::new("out/b.txt")));
    }

    #[test]
    fn test_mem_storage_read_missing_is_not_found() {
        let storage = MemStorage::new();
        let err = storage.read_text(Path::new("nope.txt")).unwrap_err();
        match err {
            Error::Storage { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mem_storage_remove_tree_keeps_root() {
        let storage = MemStorage::new();
        storage.ensure_dir(Path::new("out/cfg")).unwrap();
        storage.ensure_dir(Path::new("out/cfg/sub")).unwrap();
        storage
            .write_text(Path::new("out/cfg/stale.txt"), "old")
            .unwrap();
        storage.remove_tree(Path::new("out/cfg")).unwrap();
        assert!(!storage.exists(Path::new("out/cfg/stale.txt")));
        assert!(!storage.exists(Path::new("out/cfg/sub")));
        assert!(storage.exists(Path::new("out/cfg")));
    }

    #[test]
    fn test_recording_storage_captures_writes() {
        let inner = MemStorage::new();
        inner.seed("templates/t/index.tpl", "body");
        let recording = RecordingStorage::new(inner);
        assert_eq!(
            recording
                .read_text(Path::new("templates/t/index.tpl"))
                .unwrap(),
            "body"
        );
        recording
            .write_text(Path::new("out/t/index.out"), "rendered")
            .unwrap();
        let writes = recording.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes.get(Path::new("out/t/index.out")).map(String::as_str),
            Some("rendered")
        );
    }

    #[test]
    fn test_recording_storage_remove_tree_hides_inner_files() {
        let inner = MemStorage::new();
        inner.seed("out/t/stale.txt", "old");
        let recording = RecordingStorage::new(inner);
        assert!(recording.exists(Path::new("out/t/stale.txt")));
        recording.remove_tree(Path::new("out/t")).unwrap();
        assert!(!recording.exists(Path::new("out/t/stale.txt")));
    }

    #[test]
    fn test_fs_storage_remove_tree_missing_dir_ok() {
        let storage = FsStorage;
        let missing = std::env::temp_dir().join(format!(
            "tplforge_missing_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        assert!(storage.remove_tree(&missing).is_ok());
    }
}
