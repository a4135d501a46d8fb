//! Loading and saving whole variable store files.
//!
//! A [`VariableStore`] is decoded once per load, edited in place, and
//! re-encoded in full on save. Saving encodes into memory first and replaces
//! the file by renaming a fully written sibling, so a failure at any point
//! leaves the previous file untouched.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec::{DecodeReport, decode_database_with_report, encode_database};
use crate::edit;
use crate::error::{EditError, EncodeError, StoreError};
use crate::model::{Fingerprint, Table, Value};
use crate::path::{flatten, get_by_path, set_by_path};

/// A decoded variable store and what is known about its origin.
#[derive(Debug, Clone)]
pub struct VariableStore {
    root: Table,
    report: DecodeReport,
    baseline: Fingerprint,
}

impl VariableStore {
    /// Decodes a store from its full file contents.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let (root, report) = decode_database_with_report(bytes)?;
        let baseline = Fingerprint::of(&encode_database(&root)?);
        Ok(Self {
            root,
            report,
            baseline,
        })
    }

    /// Wraps an in-memory root table, e.g. one built from scratch.
    pub fn from_root(root: Table) -> Result<Self, EncodeError> {
        let baseline = Fingerprint::of(&encode_database(&root)?);
        Ok(Self {
            root,
            report: DecodeReport::default(),
            baseline,
        })
    }

    /// Reads and decodes a store file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_bytes(&bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            entries = store.root.len(),
            recovered = store.report.recovered(),
            "loaded variable store"
        );
        Ok(store)
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Table {
        &mut self.root
    }

    pub fn into_root(self) -> Table {
        self.root
    }

    /// Returns what the decoder did while loading this store.
    pub fn report(&self) -> &DecodeReport {
        &self.report
    }

    /// Returns the fingerprint of the canonical encoding at load time.
    pub fn baseline(&self) -> Fingerprint {
        self.baseline
    }

    /// Looks up the value at a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_by_path(&self.root, path)
    }

    /// Stores a value at a dotted path.
    pub fn set(&mut self, path: &str, value: Value) {
        set_by_path(&mut self.root, path, value);
    }

    /// Flattens the store into dotted paths and leaf values.
    pub fn flatten(&self) -> Table {
        flatten(&self.root)
    }

    /// Applies `(path, text)` edits, keeping each leaf's kind.
    pub fn apply_text_edits<I, P, T>(&mut self, edits: I) -> Result<usize, EditError>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: AsRef<str>,
    {
        edit::apply_text_edits(&mut self.root, edits)
    }

    /// Encodes the whole store.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        encode_database(&self.root)
    }

    /// Returns the fingerprint of the store's current encoding.
    pub fn fingerprint(&self) -> Result<Fingerprint, EncodeError> {
        Ok(Fingerprint::of(&self.to_bytes()?))
    }

    /// Returns true if the store would encode differently than at load time.
    pub fn is_modified(&self) -> Result<bool, EncodeError> {
        Ok(self.fingerprint()? != self.baseline)
    }

    /// Writes the store to `path`, replacing any existing file.
    ///
    /// The full encoding is produced before the filesystem is touched. It is
    /// written to a temporary file beside `path`, flushed, and renamed over
    /// the target. The new contents become the baseline.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        write_replacing(path, &bytes).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.baseline = Fingerprint::of(&bytes);
        info!(path = %path.display(), bytes = bytes.len(), "saved variable store");
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_replacing(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
