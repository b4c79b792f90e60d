//! Combined-row cache keyed on the parsed input and file modification times.
//!
//! The cache holds the last successfully combined row set together with the
//! group list and file stamps it was built from. Each call captures fresh
//! stamps and compares them with the stored ones; any difference (including a
//! file appearing or disappearing) makes the cache stale.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::models::{CombinedRowSet, Group};
use crate::parser::groups::all_paths;

/// Modification time of every referenced path, `None` when it does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStamps(BTreeMap<PathBuf, Option<SystemTime>>);

impl FileStamps {
    /// Stat every path of every group.
    pub fn capture(groups: &[Group]) -> Self {
        Self(
            all_paths(groups)
                .map(|path| (path.to_path_buf(), modified(path)))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, Option<SystemTime>)> {
        self.0.iter().map(|(p, t)| (p.as_path(), *t))
    }

    /// Paths whose stamp differs between `self` and `other`.
    pub fn changed_paths<'a>(&'a self, other: &'a FileStamps) -> Vec<&'a Path> {
        let mut changed: Vec<&Path> = self
            .0
            .iter()
            .filter(|(path, stamp)| other.0.get(*path) != Some(*stamp))
            .map(|(path, _)| path.as_path())
            .collect();
        changed.extend(
            other
                .0
                .keys()
                .filter(|path| !self.0.contains_key(*path))
                .map(PathBuf::as_path),
        );
        changed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Why the cached rows cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Nothing has been combined yet.
    Empty,
    /// The parsed group list differs from the cached one.
    InputChanged,
    /// A referenced file changed, appeared or disappeared.
    FilesChanged,
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Staleness::Empty => write!(f, "no cached rows"),
            Staleness::InputChanged => write!(f, "input changed"),
            Staleness::FilesChanged => write!(f, "files changed"),
        }
    }
}

/// The last combined row set and what it was built from.
#[derive(Debug, Clone, Default)]
pub struct RowCache {
    rows: CombinedRowSet,
    stamps: FileStamps,
    last_input: Option<Vec<Group>>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &CombinedRowSet {
        &self.rows
    }

    pub fn stamps(&self) -> &FileStamps {
        &self.stamps
    }

    /// Compare `groups` and freshly captured `stamps` with the cached ones.
    pub fn staleness(&self, groups: &[Group], stamps: &FileStamps) -> Option<Staleness> {
        match &self.last_input {
            None => Some(Staleness::Empty),
            Some(last) if last.as_slice() != groups => Some(Staleness::InputChanged),
            Some(_) if &self.stamps != stamps => Some(Staleness::FilesChanged),
            Some(_) => None,
        }
    }

    /// Replace the cached rows after a successful rebuild.
    pub fn store(&mut self, groups: Vec<Group>, rows: CombinedRowSet, stamps: FileStamps) {
        if !self.stamps.is_empty() {
            let changed = self.stamps.changed_paths(&stamps);
            if !changed.is_empty() {
                log::debug!("Changed files: {:?}", changed);
            }
        }
        self.rows = rows;
        self.stamps = stamps;
        self.last_input = Some(groups);
    }

    #[cfg(test)]
    pub(crate) fn rows_mut(&mut self) -> &mut CombinedRowSet {
        &mut self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;
    use std::time::Duration;
    use tempfile::tempdir;

    fn set_mtime(path: &Path, offset_secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs))
            .unwrap();
    }

    #[test]
    fn test_capture_marks_missing() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("a.csv");
        let missing = dir.path().join("b.csv");
        fs::write(&present, "N_0\n1\n").unwrap();

        let stamps = FileStamps::capture(&[Group::new([present.clone(), missing.clone()])]);

        let captured: Vec<(&Path, bool)> = stamps.iter().map(|(p, t)| (p, t.is_some())).collect();
        assert_eq!(captured, vec![(present.as_path(), true), (missing.as_path(), false)]);
    }

    #[test]
    fn test_empty_cache_is_stale() {
        let cache = RowCache::new();
        assert_eq!(cache.staleness(&[], &FileStamps::default()), Some(Staleness::Empty));
    }

    #[test]
    fn test_unchanged_is_fresh() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        fs::write(&a, "N_0\n1\n").unwrap();
        let groups = vec![Group::new([a])];

        let mut cache = RowCache::new();
        let stamps = FileStamps::capture(&groups);
        cache.store(groups.clone(), CombinedRowSet::default(), stamps);

        assert_eq!(cache.staleness(&groups, &FileStamps::capture(&groups)), None);
    }

    #[test]
    fn test_input_change_detected() {
        let mut cache = RowCache::new();
        let groups = vec![Group::new(["a.csv", "b.csv"])];
        cache.store(groups, CombinedRowSet::default(), FileStamps::default());

        let reordered = vec![Group::new(["b.csv", "a.csv"])];
        assert_eq!(
            cache.staleness(&reordered, &FileStamps::default()),
            Some(Staleness::InputChanged)
        );
    }

    #[test]
    fn test_mtime_change_detected() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        fs::write(&a, "N_0\n1\n").unwrap();
        set_mtime(&a, 0);
        let groups = vec![Group::new([a.clone()])];

        let mut cache = RowCache::new();
        cache.store(groups.clone(), CombinedRowSet::default(), FileStamps::capture(&groups));

        set_mtime(&a, 10);
        let fresh = FileStamps::capture(&groups);
        assert_eq!(cache.staleness(&groups, &fresh), Some(Staleness::FilesChanged));
        assert_eq!(cache.stamps().changed_paths(&fresh), vec![a.as_path()]);
    }

    #[test]
    fn test_deletion_detected() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        fs::write(&a, "N_0\n1\n").unwrap();
        let groups = vec![Group::new([a.clone()])];

        let mut cache = RowCache::new();
        cache.store(groups.clone(), CombinedRowSet::default(), FileStamps::capture(&groups));

        fs::remove_file(&a).unwrap();
        assert_eq!(
            cache.staleness(&groups, &FileStamps::capture(&groups)),
            Some(Staleness::FilesChanged)
        );
    }

    #[test]
    fn test_store_replaces_rows() {
        let mut cache = RowCache::new();
        let row: Row = [("S_0", "x")].into_iter().collect();
        cache.store(Vec::new(), CombinedRowSet::new(vec![row]), FileStamps::default());

        assert_eq!(cache.rows().len(), 1);
        assert_eq!(cache.staleness(&[], &FileStamps::default()), None);
    }
}
