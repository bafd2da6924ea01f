//! Engine snapshot change detection
//!
//! Every verification run first compares the engine's serialized state with
//! the newest snapshot persisted for that engine:
//! - snapshot files are named `{engine_id}{yyyyMMddHHmmss}.json`
//! - "newest" is the last matching file name in lexicographic order
//! - a new file is written only when the state differs
//!
//! Read failures count as a change, write failures are logged and ignored.

use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

/// Snapshot file suffix
pub const SNAPSHOT_SUFFIX: &str = ".json";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// Outcome of one snapshot check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStatus {
    /// State differs from the newest snapshot (or none existed)
    pub changed: bool,
    /// File written for this check, if any
    pub written: Option<PathBuf>,
}

impl SnapshotStatus {
    fn unchanged() -> Self {
        Self {
            changed: false,
            written: None,
        }
    }
}

/// Tracks engine snapshots inside one directory
#[derive(Debug, Clone)]
pub struct SnapshotTracker {
    dir: PathBuf,
}

impl SnapshotTracker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Compare against the newest snapshot and persist `state` if it changed
    pub fn check_and_persist(&self, engine_id: &str, state: &str) -> SnapshotStatus {
        self.check_and_persist_at(engine_id, state, Local::now().naive_local())
    }

    /// [`check_and_persist`](Self::check_and_persist) with an explicit timestamp
    pub fn check_and_persist_at(&self, engine_id: &str, state: &str, at: NaiveDateTime) -> SnapshotStatus {
        if !self.is_changed(engine_id, state) {
            log::debug!("{}: engine state matches latest snapshot", engine_id);
            return SnapshotStatus::unchanged();
        }

        let written = match self.persist(engine_id, state, at) {
            Ok(path) => {
                log::info!("{}: snapshot written to {}", engine_id, path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("Error during engine snapshot creation! {}", e);
                None
            }
        };

        SnapshotStatus {
            changed: true,
            written,
        }
    }

    /// Does `state` differ from the newest snapshot of `engine_id`?
    pub fn is_changed(&self, engine_id: &str, state: &str) -> bool {
        let latest = match self.latest(engine_id) {
            Ok(Some(path)) => path,
            Ok(None) => return true,
            Err(e) => {
                log::error!("Error during engine snapshot reading! {}", e);
                return true;
            }
        };

        match std::fs::read(&latest) {
            Ok(previous) => previous != state.as_bytes(),
            Err(e) => {
                log::error!("Error during engine snapshot reading! {}: {}", latest.display(), e);
                true
            }
        }
    }

    /// All snapshot files of `engine_id`, oldest first. A missing directory
    /// holds no snapshots.
    pub fn snapshots(&self, engine_id: &str) -> std::io::Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if is_snapshot_of(name, engine_id) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        Ok(names.into_iter().map(|name| self.dir.join(name)).collect())
    }

    /// Newest snapshot of `engine_id`
    pub fn latest(&self, engine_id: &str) -> std::io::Result<Option<PathBuf>> {
        Ok(self.snapshots(engine_id)?.pop())
    }

    fn persist(&self, engine_id: &str, state: &str, at: NaiveDateTime) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(snapshot_file_name(engine_id, at));
        std::fs::write(&path, state)?;
        Ok(path)
    }
}

/// `{engine_id}{yyyyMMddHHmmss}.json`
pub fn snapshot_file_name(engine_id: &str, at: NaiveDateTime) -> String {
    format!("{}{}{}", engine_id, at.format(TIMESTAMP_FORMAT), SNAPSHOT_SUFFIX)
}

/// Exactly the engine ID, then a 14-digit timestamp, then the suffix, so an
/// ID that prefixes another ID never picks up the other engine's files.
fn is_snapshot_of(file_name: &str, engine_id: &str) -> bool {
    file_name
        .strip_prefix(engine_id)
        .and_then(|rest| rest.strip_suffix(SNAPSHOT_SUFFIX))
        .map(|stamp| stamp.len() == TIMESTAMP_LEN && stamp.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;

    fn at(day: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, second)
            .unwrap()
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(snapshot_file_name("lucky7", at(5, 9)), "lucky720240305120009.json");
    }

    #[test]
    fn test_name_matching() {
        assert!(is_snapshot_of("lucky720240305120009.json", "lucky7"));
        assert!(!is_snapshot_of("lucky7720240305120009.json", "lucky7"));
        assert!(!is_snapshot_of("lucky720240305120009.txt", "lucky7"));
        assert!(!is_snapshot_of("lucky7.json", "lucky7"));
        assert!(!is_snapshot_of("other20240305120009.json", "lucky7"));
    }

    #[test]
    fn test_first_snapshot_is_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path().join("gdkSnapshots"));

        let status = tracker.check_and_persist_at("lucky7", "{\"a\":1}", at(1, 0));
        assert!(status.changed);
        let path = status.written.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_identical_state_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        assert!(tracker.check_and_persist_at("lucky7", "state-A", at(1, 0)).changed);
        let second = tracker.check_and_persist_at("lucky7", "state-A", at(2, 0));
        assert_eq!(second, SnapshotStatus::unchanged());
        assert_eq!(file_count(dir.path()), 1);
    }

    #[test]
    fn test_changed_state_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        tracker.check_and_persist_at("lucky7", "state-A", at(1, 0));
        let status = tracker.check_and_persist_at("lucky7", "state-B", at(2, 0));
        assert!(status.changed);
        assert_eq!(file_count(dir.path()), 2);

        let latest = tracker.latest("lucky7").unwrap().unwrap();
        assert_eq!(Some(latest.clone()), status.written);
        assert_eq!(std::fs::read_to_string(latest).unwrap(), "state-B");
    }

    #[test]
    fn test_same_second_change_overwrites_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        let first = tracker.check_and_persist_at("lucky7", "state-A", at(1, 0));
        let second = tracker.check_and_persist_at("lucky7", "state-B", at(1, 0));
        assert!(second.changed);
        assert_eq!(first.written, second.written);
        assert_eq!(file_count(dir.path()), 1);

        let latest = tracker.latest("lucky7").unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(latest).unwrap(), "state-B");
        assert!(tracker.is_changed("lucky7", "state-A"));
    }

    #[test]
    fn test_latest_is_by_name_not_write_order() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        // Newer timestamp written first
        std::fs::write(dir.path().join(snapshot_file_name("e", at(9, 0))), "new").unwrap();
        std::fs::write(dir.path().join(snapshot_file_name("e", at(1, 0))), "old").unwrap();

        assert!(!tracker.is_changed("e", "new"));
        assert!(tracker.is_changed("e", "old"));
    }

    #[test]
    fn test_engines_do_not_interfere() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        tracker.check_and_persist_at("lucky", "short", at(1, 0));
        tracker.check_and_persist_at("lucky7", "long", at(2, 0));

        assert!(!tracker.is_changed("lucky", "short"));
        assert!(!tracker.is_changed("lucky7", "long"));
        assert_eq!(tracker.snapshots("lucky").unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_latest_counts_as_change() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = SnapshotTracker::new(dir.path());

        // A directory with a snapshot name cannot be read as a file
        std::fs::create_dir(dir.path().join(snapshot_file_name("e", at(1, 0)))).unwrap();
        assert!(tracker.is_changed("e", "anything"));
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let tracker = SnapshotTracker::new(&blocker);
        let status = tracker.check_and_persist_at("e", "state", at(1, 0));
        assert!(status.changed);
        assert!(status.written.is_none());
    }
}
