#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use csv_keeper::error_log::ErrorLog;
use csv_keeper::store::{FileLocation, FileStore};
use tempfile::{TempDir, tempdir};

/// Scratch directory holding a store's `input/` and `output/` folders plus its
/// error log. Everything is removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("log.txt")
    }

    /// Opens a store rooted in the workspace that logs errors to `log.txt`.
    pub fn store(&self) -> FileStore {
        FileStore::open(self.path(), ErrorLog::file(self.log_path())).expect("open store")
    }

    pub fn write(&self, store: &FileStore, location: FileLocation, contents: &str) {
        fs::write(store.path(location), contents).expect("write data file");
    }

    pub fn contents(&self, store: &FileStore, location: FileLocation) -> String {
        fs::read_to_string(store.path(location)).expect("read data file")
    }

    /// Error log contents, empty when nothing has been logged yet.
    pub fn log_contents(&self) -> String {
        fs::read_to_string(self.log_path()).unwrap_or_default()
    }
}

pub fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}
