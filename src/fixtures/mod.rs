//! Test data and fixtures built by composition.
//!
//! Each fixture is a factory function returning a plain struct of the
//! dependencies a test needs. Tests combine factories instead of layering
//! fixture types on top of each other.
//!
//! ```rust
//! use idiomkit::fixtures::catalog_updater_fixture;
//!
//! let fixture = catalog_updater_fixture();
//! let manifest = fixture.updater.load_manifest("manifestNoEntry.json").unwrap();
//!
//! assert!(manifest.is_empty());
//! assert!(fixture.files.was_read("manifestNoEntry.json"));
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::mock::CallTracker;

/// Overrides the test data directory.
pub const TEST_DATA_ENV: &str = "IDIOMKIT_TEST_DATA";

/// Manifest with two entries.
pub const MANIFEST: &str = "manifest.json";

/// Manifest with no entries.
pub const MANIFEST_NO_ENTRY: &str = "manifestNoEntry.json";

/// Directory holding test data.
///
/// `$IDIOMKIT_TEST_DATA` if set, otherwise `tests/data` in this crate.
#[must_use]
pub fn test_data_root() -> PathBuf {
    env::var_os(TEST_DATA_ENV).map_or_else(
        || Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data"),
        PathBuf::from,
    )
}

/// Location of one test data file.
#[must_use]
pub fn test_data_path(component: &str) -> PathBuf {
    test_data_root().join(component)
}

/// Named text files.
pub trait FilesContainer {
    /// Read a whole file.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTestData`] if there is no such file, [`Error::Io`] if
    /// reading fails.
    fn read(&self, name: &str) -> Result<String>;

    /// Check if a file exists.
    fn contains(&self, name: &str) -> bool;
}

/// Files under a directory on disk.
#[derive(Debug, Clone)]
pub struct DirFilesContainer {
    root: PathBuf,
}

impl DirFilesContainer {
    /// Files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Files under [`test_data_root`].
    #[must_use]
    pub fn test_data() -> Self {
        Self::new(test_data_root())
    }

    /// The directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FilesContainer for DirFilesContainer {
    fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(Error::MissingTestData(path));
        }
        Ok(fs::read_to_string(path)?)
    }

    fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }
}

/// Files held in memory. Records every read.
///
/// Clones share files and history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFilesContainer {
    files: Arc<Mutex<HashMap<String, String>>>,
    reads: CallTracker<String>,
}

impl InMemoryFilesContainer {
    /// An empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    #[must_use]
    pub fn with_file(self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, name: impl Into<String>, contents: impl Into<String>) {
        self.files.lock().insert(name.into(), contents.into());
    }

    /// Names read so far, oldest first.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads.args()
    }

    /// Check if `name` was read.
    #[must_use]
    pub fn was_read(&self, name: &str) -> bool {
        self.reads.was_called_with(&name.to_string())
    }
}

impl FilesContainer for InMemoryFilesContainer {
    fn read(&self, name: &str) -> Result<String> {
        self.reads.track(name.to_string());
        self.files
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::MissingTestData(PathBuf::from(name)))
    }

    fn contains(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Entry name.
    pub name: String,
    /// Entry version.
    pub version: u32,
}

/// A catalog manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Entries in file order.
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Returns true if the manifest lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads manifests from whatever container it is given.
#[derive(Debug, Clone)]
pub struct CatalogUpdater<F> {
    files: F,
}

impl<F: FilesContainer> CatalogUpdater<F> {
    /// Use `files` as the source.
    pub fn new(files: F) -> Self {
        Self { files }
    }

    /// Read and parse a manifest.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTestData`] for an unknown file, [`Error::Json`] for a
    /// malformed one.
    pub fn load_manifest(&self, name: &str) -> Result<Manifest> {
        let raw = self.files.read(name)?;
        let manifest: Manifest = serde_json::from_str(&raw)?;
        tracing::debug!(name, entries = manifest.entries.len(), "manifest loaded");
        Ok(manifest)
    }

    /// The container.
    pub fn files(&self) -> &F {
        &self.files
    }
}

/// The files a catalog test starts with: both manifests from `tests/data`.
#[must_use]
pub fn mock_files_container() -> InMemoryFilesContainer {
    InMemoryFilesContainer::new()
        .with_file(
            MANIFEST,
            r#"{"entries": [
                {"name": "introducers", "version": 1},
                {"name": "dangerous-property", "version": 2}
            ]}"#,
        )
        .with_file(MANIFEST_NO_ENTRY, r#"{"entries": []}"#)
}

/// A catalog updater and a handle on the files it reads.
#[derive(Debug, Clone)]
pub struct CatalogUpdaterFixture {
    /// Shares state with `updater.files()`.
    pub files: InMemoryFilesContainer,
    /// The updater under test.
    pub updater: CatalogUpdater<InMemoryFilesContainer>,
}

/// Compose [`mock_files_container`] into a [`CatalogUpdater`].
#[must_use]
pub fn catalog_updater_fixture() -> CatalogUpdaterFixture {
    let files = mock_files_container();
    CatalogUpdaterFixture {
        updater: CatalogUpdater::new(files.clone()),
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_appends_component() {
        let path = test_data_path(MANIFEST_NO_ENTRY);
        assert!(path.ends_with(MANIFEST_NO_ENTRY));
        assert_eq!(path.parent(), Some(test_data_root().as_path()));
    }

    #[test]
    fn test_in_memory_manifest_with_entries() {
        let fixture = catalog_updater_fixture();
        let manifest = fixture.updater.load_manifest(MANIFEST).unwrap();

        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.entries[1].name, "dangerous-property");
        assert_eq!(fixture.files.reads(), vec![MANIFEST.to_string()]);
    }

    #[test]
    fn test_missing_manifest() {
        let fixture = catalog_updater_fixture();
        let err = fixture.updater.load_manifest("nope.json").unwrap_err();

        assert!(matches!(err, Error::MissingTestData(ref p) if p == Path::new("nope.json")));
        assert!(fixture.files.was_read("nope.json"));
    }

    #[test]
    fn test_malformed_manifest() {
        let files = InMemoryFilesContainer::new().with_file("bad.json", "{");
        let updater = CatalogUpdater::new(files);

        assert!(matches!(
            updater.load_manifest("bad.json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_fixtures_are_independent() {
        let first = catalog_updater_fixture();
        let second = catalog_updater_fixture();

        first.files.insert("extra.json", "{}");
        assert!(first.updater.files().contains("extra.json"));
        assert!(!second.files.contains("extra.json"));
    }

    #[test]
    fn test_dir_container_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("m.json"), r#"{"entries": [{"name": "a", "version": 3}]}"#)
            .unwrap();
        let updater = CatalogUpdater::new(DirFilesContainer::new(dir.path()));

        let manifest = updater.load_manifest("m.json").unwrap();
        assert_eq!(manifest.entries[0].version, 3);
        assert!(updater.files().contains("m.json"));
        assert_eq!(updater.files().root(), dir.path());
    }

    #[test]
    fn test_dir_container_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let container = DirFilesContainer::new(dir.path());

        assert!(!container.contains("m.json"));
        assert!(matches!(
            container.read("m.json"),
            Err(Error::MissingTestData(p)) if p == dir.path().join("m.json")
        ));
    }

    #[test]
    fn test_manifest_without_entries_key_is_empty() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.is_empty());
    }
}
