//! Step tracing for the merge engine.
//!
//! Every rule application during a merge pass is recorded together with the
//! cursor positions it saw. The log backs the engine's diagnostics and lets
//! callers report how much user content a regeneration carried through.

use super::Cursors;

/// Which merge rule fired for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The line was identical in all three sequences.
    Unchanged,
    /// A user-edited block was captured from the observed sequence.
    UserBlock {
        /// Observed lines consumed by the capturing scan.
        captured: usize,
    },
    /// A generator-inserted run was emitted ahead of a surviving anchor.
    GeneratedInsertion {
        /// Proposed lines emitted before the anchor.
        emitted: usize,
    },
    /// Observed was exhausted; baseline and proposed advanced together.
    CatchUp,
    /// A line appended past the end of both baseline and observed.
    TailAddition,
    /// A trailing mismatch resolved in favor of the proposal.
    Fallback,
}

/// A single recorded step: the rule that fired and the cursors before it.
#[derive(Debug, Clone, Copy)]
pub struct StepEntry {
    /// The rule that fired.
    pub kind: StepKind,
    /// Cursor positions at the start of the step.
    pub cursors: Cursors,
}

/// Log of rule applications during one merge pass.
#[derive(Debug, Default)]
pub struct StepLog {
    steps: Vec<StepEntry>,
}

impl StepLog {
    /// Creates a new empty log.
    pub fn new() -> Self {
        StepLog { steps: Vec::new() }
    }

    /// Records one rule application.
    pub(crate) fn record(&mut self, kind: StepKind, cursors: Cursors) {
        tracing::trace!(
            ?kind,
            baseline = cursors.baseline,
            observed = cursors.observed,
            proposed = cursors.proposed,
            "merge step"
        );
        self.steps.push(StepEntry { kind, cursors });
    }

    /// Returns the number of recorded steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns the recorded steps in order.
    pub fn steps(&self) -> &[StepEntry] {
        &self.steps
    }

    /// Counts steps by rule, ignoring rule payloads.
    pub fn count_by_kind(&self, kind: StepKind) -> usize {
        self.steps
            .iter()
            .filter(|e| std::mem::discriminant(&e.kind) == std::mem::discriminant(&kind))
            .count()
    }

    /// Total observed lines carried through user-edited blocks.
    pub fn captured_lines(&self) -> usize {
        self.steps
            .iter()
            .map(|e| match e.kind {
                StepKind::UserBlock { captured } => captured,
                _ => 0,
            })
            .sum()
    }
}
