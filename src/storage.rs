/*
 *  storage.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Opaque settings blob persistence
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("bad settings magic {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported settings version {0}")]
    UnsupportedVersion(u8),
    #[error("settings blob size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("settings text field {0} is not valid UTF-8")]
    InvalidText(&'static str),
}

/// Whole-blob persistence. The face reads one blob at start and writes the
/// entire blob back after each settings merge.
pub trait BlobStore {
    /// `Ok(None)` on first run
    fn load(&mut self) -> Result<Option<Vec<u8>>, StorageError>;

    fn save(&mut self, blob: &[u8]) -> Result<(), StorageError>;
}

/// Blob kept in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, first run", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        // write-then-rename
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store, counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self { blob: Some(blob), writes: 0 }
    }

    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        self.blob = Some(blob.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("shards-test-{}-{}", std::process::id(), name))
            .join("settings.bin")
    }

    #[test]
    fn file_store_first_run_is_none() {
        let mut store = FileStore::new(scratch_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let path = scratch_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(&[1, 2, 3]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![1, 2, 3]));
        store.save(&[9]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![9]));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(b"abc").unwrap();
        store.save(b"abcd").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.blob(), Some(&b"abcd"[..]));
    }
}
