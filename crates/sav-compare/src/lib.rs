//! sav-compare: consistency checking between creature snapshots.
//!
//! Compares two diff-encodings of "the same logical creature at two
//! points that should be equivalent" (canonical use: pre-save vs
//! post-load) and reports every field that disagrees.

pub mod diff;
pub mod report;

pub use diff::{diff_records, FieldMismatch};
pub use report::ConsistencyReport;

use sav_state::StateError;

/// Compare two creature diff-encodings.
///
/// Prints one line per mismatch to stderr and returns whether the two
/// records are gameplay-equivalent. A mismatch is a normal outcome,
/// not an error; only a malformed record fails.
pub fn diff(actual: &str, expected: &str) -> Result<bool, StateError> {
    let mismatches = diff_records(actual, expected)?;
    for mismatch in &mismatches {
        eprintln!("{mismatch}");
    }
    Ok(mismatches.is_empty())
}
