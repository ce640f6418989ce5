//! Persistence for the two CSV files behind the menu.
//!
//! The primary file (`input/data.csv`) receives every write and is the first
//! choice for reads. The fallback file (`output/data.csv`) is only read when
//! the primary one is missing or empty. Both are created empty when the store
//! is opened and are never deleted.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    error::{FailureKind, StoreError, StoreResult},
    error_log::{ErrorLog, guard},
    io_utils,
};

pub type Row = Vec<String>;
pub type Dataset = Vec<Row>;

pub const PRIMARY_DIR: &str = "input";
pub const FALLBACK_DIR: &str = "output";
pub const DATA_FILE: &str = "data.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLocation {
    Primary,
    Fallback,
}

#[derive(Debug)]
pub struct FileStore {
    primary: PathBuf,
    fallback: PathBuf,
    log: ErrorLog,
}

impl FileStore {
    /// Opens the store rooted at `root`, creating `input/data.csv` and
    /// `output/data.csv` when they do not exist yet.
    pub fn open(root: impl AsRef<Path>, log: ErrorLog) -> StoreResult<Self> {
        let root = root.as_ref();
        let store = Self {
            primary: root.join(PRIMARY_DIR).join(DATA_FILE),
            fallback: root.join(FALLBACK_DIR).join(DATA_FILE),
            log,
        };
        guard(&store.log, "open", FailureKind::Data, || {
            ensure_file(&store.primary)?;
            ensure_file(&store.fallback)
        })?;
        debug!(
            "Opened store with primary {:?} and fallback {:?}",
            store.primary, store.fallback
        );
        Ok(store)
    }

    pub fn path(&self, location: FileLocation) -> &Path {
        match location {
            FileLocation::Primary => &self.primary,
            FileLocation::Fallback => &self.fallback,
        }
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    /// Picks the file a read would use, if any holds data.
    pub fn readable_location(&self) -> Option<FileLocation> {
        [FileLocation::Primary, FileLocation::Fallback]
            .into_iter()
            .find(|location| has_data(self.path(*location)))
    }

    pub fn read(&self) -> StoreResult<Dataset> {
        guard(&self.log, "read", FailureKind::Data, || {
            let location = self
                .readable_location()
                .ok_or_else(|| StoreError::DataUnavailable {
                    primary: self.primary.clone(),
                    fallback: self.fallback.clone(),
                })?;
            let path = self.path(location);
            let rows = read_file(path)?;
            debug!("Read {} row(s) from {:?} ({location:?})", rows.len(), path);
            Ok(rows)
        })
    }

    /// Replaces the primary file's contents with `rows`. A failure part way
    /// through leaves whatever was written so far.
    pub fn rewrite_all(&self, rows: &[Row]) -> StoreResult<()> {
        guard(&self.log, "rewrite_all", FailureKind::Data, || {
            let path = &self.primary;
            let file = File::create(path).map_err(|e| StoreError::corrupted(path, "write", e))?;
            let mut writer = BufWriter::new(file);
            rows.iter()
                .try_for_each(|row| io_utils::write_row(&mut writer, row))
                .and_then(|()| writer.flush())
                .map_err(|e| StoreError::corrupted(path, "write", e))?;
            info!("Rewrote {:?} with {} row(s)", path, rows.len());
            Ok(())
        })
    }

    pub fn append(&self, row: &[String]) -> StoreResult<()> {
        guard(&self.log, "append", FailureKind::Data, || {
            let path = &self.primary;
            let mut file = OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(|e| StoreError::corrupted(path, "append to", e))?;
            io_utils::write_row(&mut file, row)
                .map_err(|e| StoreError::corrupted(path, "append to", e))?;
            info!("Appended a {}-field row to {:?}", row.len(), path);
            Ok(())
        })
    }
}

fn ensure_file(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::corrupted(parent, "create", e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::corrupted(path, "create", e))?;
    Ok(())
}

fn has_data(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

fn read_file(path: &Path) -> StoreResult<Dataset> {
    let file = File::open(path).map_err(|e| StoreError::corrupted(path, "read", e))?;
    io_utils::read_rows(BufReader::new(file)).map_err(|e| StoreError::corrupted(path, "read", e))
}
