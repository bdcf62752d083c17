//! Three-way line merge engine.
//!
//! This module implements the core merge that reconciles a baseline (last
//! generated content), the observed content (possibly user-edited since),
//! and a proposal (freshly generated content) into merged output plus the
//! new baseline.
//!
//! # Algorithm Overview
//!
//! One cursor walks each sequence, and every step applies the first
//! matching rule, in this priority order:
//!
//! 1. All three lines equal: emit the line, advance all three cursors.
//! 2. Proposed equals baseline but the observed side has content: the
//!    divergence is a user edit. Scan the observed sequence up to the next
//!    baseline anchor and emit the captured block.
//! 3. Proposed differs from baseline, but the current baseline line occurs
//!    later in the proposal: the generator inserted lines before a
//!    surviving anchor. Emit the inserted run.
//! 4. Observed exhausted while baseline and proposal are still paired:
//!    emit the proposed line, advance baseline and proposed.
//! 5. Only the proposal has content left: emit it.
//! 6. Proposal has content and both other sequences are at (or one line
//!    from) their ends: emit the proposed line. Catch-all for asymmetric
//!    trailing mismatches.
//!
//! If no rule matches, the engine fails fast with the offending cursor
//! state rather than stalling or dropping lines.
//!
//! # Termination
//!
//! Every rule strictly advances at least one cursor: rules 1, 4, 5 and 6
//! advance by construction; rule 2 consumes at least one observed line
//! unless a next anchor exists, in which case baseline and proposed
//! advance; rule 3 only fires when at least one proposed line precedes the
//! anchor. The walk therefore ends within `len(baseline) + len(observed) +
//! len(proposed)` steps. A debug counter bounded by that sum plus one
//! trips [`Error::IterationBoundExceeded`] as a defensive assertion only.

mod step_log;

pub use step_log::{StepEntry, StepKind, StepLog};

use crate::error::{Error, Result};
use crate::scan::scan_to_anchor;
use crate::sequence::LineSequence;

/// Cursor positions into the three sequences.
///
/// Cursors only ever move forward during a merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    /// Position in the baseline sequence.
    pub baseline: usize,
    /// Position in the observed sequence.
    pub observed: usize,
    /// Position in the proposed sequence.
    pub proposed: usize,
}

impl Cursors {
    /// Sum of the three positions. Strictly increases every merge step.
    pub fn sum(&self) -> usize {
        self.baseline + self.observed + self.proposed
    }
}

/// Result of a merge invocation.
///
/// The merged output becomes the caller's new observed state and the
/// baseline is always the proposal unchanged, win or lose on content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged line sequence.
    pub merged: LineSequence,
    /// The new baseline for the next invocation.
    pub baseline: LineSequence,
}

/// The merge engine: owns the three-cursor walk over one invocation.
///
/// The engine is stateless between invocations - the caller owns the
/// baseline/observed pair and commits the outcome after every call. One
/// engine performs one pass; construct a new one per merge.
pub struct Merge {
    baseline: LineSequence,
    observed: LineSequence,
    proposed: LineSequence,
    cursors: Cursors,
    /// Trace of rule applications, available after [`Merge::run`].
    pub step_log: StepLog,
}

impl Merge {
    /// Creates a new engine over the three sequences.
    pub fn new(baseline: LineSequence, observed: LineSequence, proposed: LineSequence) -> Self {
        Merge {
            baseline,
            observed,
            proposed,
            cursors: Cursors::default(),
            step_log: StepLog::new(),
        }
    }

    /// Returns the current cursor positions.
    pub fn cursors(&self) -> Cursors {
        self.cursors
    }

    /// Runs the merge pass.
    ///
    /// On any error no outcome is produced; the caller's prior state is
    /// untouched.
    pub fn run(&mut self) -> Result<MergeOutcome> {
        let bound = self.baseline.len() + self.observed.len() + self.proposed.len() + 1;
        let mut output = LineSequence::new();
        let mut steps = 0usize;

        while !self.exhausted() {
            if steps >= bound {
                return Err(Error::IterationBoundExceeded {
                    bound,
                    baseline: self.cursors.baseline,
                    observed: self.cursors.observed,
                    proposed: self.cursors.proposed,
                });
            }
            steps += 1;
            self.step(&mut output)?;
        }

        output.pop_trailing_blank();
        tracing::debug!(steps, lines = output.len(), "merge complete");

        Ok(MergeOutcome {
            merged: output,
            baseline: self.proposed.clone(),
        })
    }

    /// Returns true once all three cursors point past their sequence ends.
    fn exhausted(&self) -> bool {
        self.cursors.baseline >= self.baseline.len()
            && self.cursors.observed >= self.observed.len()
            && self.cursors.proposed >= self.proposed.len()
    }

    /// Applies the first matching rule for the current cursor state.
    fn step(&mut self, output: &mut LineSequence) -> Result<()> {
        let c = self.cursors;
        let bl = self.baseline.get(c.baseline);
        let ol = self.observed.get(c.observed);
        let pl = self.proposed.get(c.proposed);

        // Rule 1: unchanged line in all three.
        if let Some(line) = ol {
            if bl == Some(line) && pl == Some(line) {
                self.step_log.record(StepKind::Unchanged, c);
                output.push(line);
                self.cursors.baseline += 1;
                self.cursors.observed += 1;
                self.cursors.proposed += 1;
                return Ok(());
            }
        }

        // Rule 2: user-edited block. The proposal did not change this
        // position relative to baseline (including both being exhausted),
        // so the divergence is on the observed side. Capture observed up to
        // the next anchor; a final anchor with no successor serves as its
        // own anchor so an unchanged trailing line is left for rule 1.
        if pl == bl && ol.is_some() {
            let next_anchor = self.baseline.get(c.baseline + 1);
            let anchor = next_anchor.or(bl);
            let slice = self.observed.slice_from(c.observed);
            let scan = scan_to_anchor(slice, anchor);
            let found = scan.found_anchor(slice.len());

            self.step_log
                .record(StepKind::UserBlock { captured: scan.consumed }, c);
            output.extend_from_slice(&scan.captured);
            self.cursors.observed += scan.consumed;

            // Baseline and proposed were equal here, so they move together:
            // past the consumed anchor when a successor exists, or past a
            // final anchor whose line the user's tail replaced outright.
            if next_anchor.is_some() || (!found && bl.is_some()) {
                self.cursors.baseline += 1;
                self.cursors.proposed += 1;
            }
            return Ok(());
        }

        // Rule 3: generator-inserted block. The current baseline line still
        // occurs later in the proposal, so everything before it is new
        // output to surface ahead of the surviving anchor.
        if let (Some(anchor), Some(_)) = (bl, pl) {
            let slice = self.proposed.slice_from(c.proposed);
            let scan = scan_to_anchor(slice, Some(anchor));
            // A zero-length run means the anchor is already under the
            // proposed cursor; that state belongs to rules 4 and beyond.
            if scan.consumed > 0 && scan.found_anchor(slice.len()) {
                self.step_log
                    .record(StepKind::GeneratedInsertion { emitted: scan.consumed }, c);
                output.extend_from_slice(&scan.captured);
                self.cursors.proposed += scan.consumed;
                return Ok(());
            }
        }

        // Rule 4: observed ran out while baseline and proposal are still
        // paired - trailing content present in both generations that the
        // observed side never reached.
        if let (Some(_), None, Some(line)) = (bl, ol, pl) {
            self.step_log.record(StepKind::CatchUp, c);
            output.push(line);
            self.cursors.baseline += 1;
            self.cursors.proposed += 1;
            return Ok(());
        }

        // Rule 5: lines appended purely by the latest generation, past the
        // end of both prior baseline and observed.
        if let (None, None, Some(line)) = (bl, ol, pl) {
            self.step_log.record(StepKind::TailAddition, c);
            output.push(line);
            self.cursors.proposed += 1;
            return Ok(());
        }

        // Rule 6: trailing mismatches not covered above - both other
        // sequences are at or one line from their ends.
        if let Some(line) = pl {
            let observed_ending = ol.is_none() || self.observed.get(c.observed + 1).is_none();
            let baseline_ending = bl.is_none() || self.baseline.get(c.baseline + 1).is_none();
            if observed_ending && baseline_ending {
                self.step_log.record(StepKind::Fallback, c);
                output.push(line);
                self.cursors.proposed += 1;
                return Ok(());
            }
        }

        Err(Error::NonExhaustiveAlignment {
            baseline: c.baseline,
            observed: c.observed,
            proposed: c.proposed,
            baseline_line: bl.map(str::to_string),
            observed_line: ol.map(str::to_string),
            proposed_line: pl.map(str::to_string),
        })
    }
}

/// Merges a proposal onto the prior baseline/observed pair.
///
/// If either prior state is absent this is the first generation: no walk
/// occurs and both the merged output and the new baseline are the proposal
/// verbatim.
pub fn merge(
    baseline: Option<LineSequence>,
    observed: Option<LineSequence>,
    proposed: LineSequence,
) -> Result<MergeOutcome> {
    match (baseline, observed) {
        (Some(baseline), Some(observed)) => Merge::new(baseline, observed, proposed).run(),
        _ => Ok(MergeOutcome {
            merged: proposed.clone(),
            baseline: proposed,
        }),
    }
}
