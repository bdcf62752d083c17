//! Baseline persistence for managed artifacts.
//!
//! The last committed generation of every managed file is kept in a cache
//! directory that mirrors the target tree: the baseline for `src/index.html`
//! lives at `<cache root>/src/index.html`. An absent entry means the
//! artifact has never been through a merge.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::sequence::LineSequence;

/// Stores the last committed baseline for each managed artifact.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    root: PathBuf,
}

impl BaselineStore {
    /// Creates a store rooted at the given cache directory.
    ///
    /// The directory is created lazily on the first commit.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BaselineStore { root: root.into() }
    }

    /// Returns the cache root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the on-disk path of the entry for an artifact.
    pub fn entry_path(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    /// Loads the committed baseline for an artifact.
    ///
    /// Returns `Ok(None)` when no baseline has been committed yet.
    pub fn load(&self, rel: &Path) -> Result<Option<LineSequence>> {
        let path = self.entry_path(rel);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(LineSequence::from_bytes(&bytes)?))
    }

    /// Commits a new baseline for an artifact.
    ///
    /// The entry is replaced atomically so a crash never leaves a
    /// half-written baseline behind.
    pub fn commit(&self, rel: &Path, baseline: &LineSequence) -> Result<()> {
        self.stage(rel, baseline)?.commit()
    }

    /// Stages a new baseline entry without persisting it.
    ///
    /// Lets a caller prepare several writes and only persist them once all
    /// of them staged cleanly.
    pub(crate) fn stage(&self, rel: &Path, baseline: &LineSequence) -> Result<StagedWrite> {
        StagedWrite::stage(&self.entry_path(rel), &baseline.to_text())
    }
}

/// A write prepared in a temp file next to its target but not yet
/// persisted. Dropping it without committing removes the temp file and
/// leaves the target untouched.
pub(crate) struct StagedWrite {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Stages `content` for `path`, creating parent directories as needed.
    pub(crate) fn stage(path: &Path, content: &str) -> Result<StagedWrite> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        Ok(StagedWrite {
            tmp,
            target: path.to_path_buf(),
        })
    }

    /// Renames the temp file over the target.
    pub(crate) fn commit(self) -> Result<()> {
        self.tmp.persist(&self.target).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_load_missing_entry_is_none() {
        let dir = tempdir().unwrap();
        let store = BaselineStore::new(dir.path());

        assert_eq!(store.root(), dir.path());
        assert!(store.load(Path::new("a/b.txt")).unwrap().is_none());
    }

    #[test]
    fn test_dropped_stage_leaves_entry_untouched() {
        let dir = tempdir().unwrap();
        let store = BaselineStore::new(dir.path());
        let rel = Path::new("file.txt");

        store.commit(rel, &seq(&["old"])).unwrap();
        let staged = store.stage(rel, &seq(&["new"])).unwrap();
        drop(staged);

        assert_eq!(store.load(rel).unwrap(), Some(seq(&["old"])));
    }

    #[test]
    fn test_commit_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = BaselineStore::new(dir.path());
        let rel = Path::new("nested/deeply/index.html");
        let baseline = seq(&["a", "b", "c"]);

        store.commit(rel, &baseline).unwrap();

        assert_eq!(store.load(rel).unwrap(), Some(baseline));
        assert!(store.entry_path(rel).exists());
    }

    #[test]
    fn test_commit_replaces_previous_entry() {
        let dir = tempdir().unwrap();
        let store = BaselineStore::new(dir.path());
        let rel = Path::new("file.txt");

        store.commit(rel, &seq(&["old"])).unwrap();
        store.commit(rel, &seq(&["new"])).unwrap();

        assert_eq!(store.load(rel).unwrap(), Some(seq(&["new"])));
    }

    #[test]
    fn test_load_rejects_non_utf8_entry() {
        let dir = tempdir().unwrap();
        let store = BaselineStore::new(dir.path());
        let rel = Path::new("binary.bin");

        fs::write(store.entry_path(rel), [0x00, 0xff, 0xfe]).unwrap();

        assert!(matches!(
            store.load(rel),
            Err(Error::MalformedInput(_))
        ));
    }
}
