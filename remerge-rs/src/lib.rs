//! Remerge - three-way line merge for regenerated files.
//!
//! This library reconciles three versions of a line-oriented text artifact:
//! the last generated baseline, the currently observed (possibly user-edited)
//! content, and a freshly generated proposal. The merged result keeps the
//! user's edits while incorporating everything new in the proposal.
//!
//! # Overview
//!
//! Code generators often re-emit files the user is allowed to touch between
//! runs. Overwriting the file loses the user's work; skipping the file loses
//! the regeneration. Remerge walks all three versions with one cursor each,
//! using the baseline as a chain of anchor lines, and decides line by line
//! whether to keep observed content, emit proposed content, or capture a
//! whole user-edited block.
//!
//! # Key Features
//!
//! - No edit history or diff metadata required - only the three texts
//! - User-edited blocks survive regeneration in place
//! - New generator output is inserted at the correct anchored positions
//! - Deterministic, bounded, single pass; fails fast on unresolvable input
//!
//! # Example Use Case
//!
//! A scaffolding tool emits an HTML index file. The user adds a few meta tags
//! by hand. The next run of the tool emits a new index with an extra script
//! tag - the merged file carries both the meta tags and the script tag.

pub mod error;
pub mod merge;
pub mod regen;
pub mod scan;
pub mod sequence;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use merge::{merge, Cursors, Merge, MergeOutcome, StepEntry, StepKind, StepLog};
pub use regen::{Regenerator, WriteOutcome};
pub use scan::{scan_to_anchor, ScanResult};
pub use sequence::LineSequence;
pub use store::BaselineStore;
