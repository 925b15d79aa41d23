//! Preimage readers: the sources of pre-patch file contents a driver applies against.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;

/// Failure modes when fetching a preimage.
///
/// `NotFound` stays distinct from transport errors: a missing preimage is a
/// patch-level failure the driver re-classifies, not an I/O fault.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("'{0}' does not exist")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of pre-patch file contents, keyed by repository-relative path.
pub trait PreimageReader {
    fn read(&self, path: &str) -> Result<Bytes, ReadError>;
}

/// Reads preimages from files under a working-directory root.
#[derive(Debug)]
pub struct WorkdirReader {
    root: PathBuf,
}

impl WorkdirReader {
    pub fn new(root: impl Into<PathBuf>) -> WorkdirReader {
        WorkdirReader { root: root.into() }
    }
}

impl PreimageReader for WorkdirReader {
    fn read(&self, path: &str) -> Result<Bytes, ReadError> {
        match std::fs::read(self.root.join(path)) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ReadError::NotFound(path.to_string()))
            }
            Err(e) => Err(ReadError::Io(e)),
        }
    }
}

/// In-memory reader backed by a path map. Stands in for staged or tree
/// contents the caller has already materialized.
#[derive(Debug, Default)]
pub struct MemoryReader {
    entries: HashMap<String, Bytes>,
}

impl MemoryReader {
    pub fn new() -> MemoryReader {
        MemoryReader::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Bytes>) {
        self.entries.insert(path.into(), contents.into());
    }
}

impl PreimageReader for MemoryReader {
    fn read(&self, path: &str) -> Result<Bytes, ReadError> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| ReadError::NotFound(path.to_string()))
    }
}
