//! Error types for remerge.

use thiserror::Error;

/// Result type alias for remerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during remerge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be resolved to well-formed text lines.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// No merge rule matched the current cursor state.
    ///
    /// This is an internal defect state, not a property of legitimate input
    /// sizes: the rule set is expected to cover every reachable combination
    /// of the three cursor reads. The offending state is carried so the
    /// caller can report exactly where alignment broke down.
    #[error(
        "no merge rule matched at baseline[{baseline}]={baseline_line:?} \
         observed[{observed}]={observed_line:?} proposed[{proposed}]={proposed_line:?}"
    )]
    NonExhaustiveAlignment {
        /// Baseline cursor position.
        baseline: usize,
        /// Observed cursor position.
        observed: usize,
        /// Proposed cursor position.
        proposed: usize,
        /// Line under the baseline cursor, if any.
        baseline_line: Option<String>,
        /// Line under the observed cursor, if any.
        observed_line: Option<String>,
        /// Line under the proposed cursor, if any.
        proposed_line: Option<String>,
    },

    /// The defensive iteration bound was exceeded.
    ///
    /// The bound is provably sufficient, so hitting it indicates a logic
    /// defect of the same class as [`Error::NonExhaustiveAlignment`].
    #[error(
        "iteration bound of {bound} steps exceeded at \
         baseline={baseline} observed={observed} proposed={proposed}"
    )]
    IterationBoundExceeded {
        /// The bound that was exceeded.
        bound: usize,
        /// Baseline cursor position when the bound tripped.
        baseline: usize,
        /// Observed cursor position when the bound tripped.
        observed: usize,
        /// Proposed cursor position when the bound tripped.
        proposed: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
