//! Regeneration driver.
//!
//! Ties a generation stage to the merge engine and the baseline store: for
//! each managed artifact the driver reads the prior baseline and the
//! current on-disk content, merges the fresh proposal onto them, writes the
//! merged text back, and commits the proposal as the new baseline. The
//! driver serializes this cycle per artifact; nothing merges the same file
//! twice concurrently within one run.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::merge::Merge;
use crate::sequence::LineSequence;
use crate::store::{BaselineStore, StagedWrite};

/// Outcome of writing one managed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// First generation: no prior baseline or on-disk content existed.
    Created,
    /// Regenerated on top of prior state.
    Regenerated {
        /// Observed lines carried through user-edited blocks.
        preserved: usize,
    },
}

/// Drives regeneration of managed artifacts under a target root.
pub struct Regenerator {
    root: PathBuf,
    store: BaselineStore,
    outcomes: FxHashMap<PathBuf, WriteOutcome>,
}

impl Regenerator {
    /// Creates a driver for artifacts under `root`, with baselines in
    /// `store`.
    pub fn new(root: impl Into<PathBuf>, store: BaselineStore) -> Self {
        Regenerator {
            root: root.into(),
            store,
            outcomes: FxHashMap::default(),
        }
    }

    /// Returns the baseline store.
    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    /// Writes one artifact from freshly generated text.
    ///
    /// `rel` is the artifact path relative to the root. Both writes are
    /// staged before either is persisted: a failure anywhere up to that
    /// point changes neither the artifact nor its baseline entry.
    pub fn write(&mut self, rel: &Path, proposed_text: &str) -> Result<WriteOutcome> {
        let proposed = LineSequence::parse(proposed_text);
        let artifact = self.root.join(rel);

        let baseline = self.store.load(rel)?;
        let observed = if artifact.exists() {
            Some(LineSequence::from_bytes(&fs::read(&artifact)?)?)
        } else {
            None
        };

        let (outcome, merged, new_baseline) = match (baseline, observed) {
            (Some(baseline), Some(observed)) => {
                let mut engine = Merge::new(baseline, observed, proposed);
                let result = engine.run()?;
                let preserved = engine.step_log.captured_lines();
                (WriteOutcome::Regenerated { preserved }, result.merged, result.baseline)
            }
            _ => (WriteOutcome::Created, proposed.clone(), proposed),
        };

        // Stage both writes before persisting either; an error preparing
        // the baseline entry leaves the artifact untouched.
        let artifact_write = StagedWrite::stage(&artifact, &merged.to_text())?;
        let baseline_write = self.store.stage(rel, &new_baseline)?;
        artifact_write.commit()?;
        baseline_write.commit()?;

        tracing::info!(path = %rel.display(), ?outcome, "wrote artifact");
        self.outcomes.insert(rel.to_path_buf(), outcome);
        Ok(outcome)
    }

    /// Per-artifact outcomes for this run, for end-of-run reporting.
    pub fn outcomes(&self) -> &FxHashMap<PathBuf, WriteOutcome> {
        &self.outcomes
    }

    /// Total user lines preserved across all artifacts written this run.
    pub fn preserved_total(&self) -> usize {
        self.outcomes
            .values()
            .map(|o| match o {
                WriteOutcome::Regenerated { preserved } => *preserved,
                WriteOutcome::Created => 0,
            })
            .sum()
    }
}
