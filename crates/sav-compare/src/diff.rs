//! Diff-record comparison.
//!
//! Compares `name`, `current_health` and `current_block` exactly, and
//! the power lists only while the first record reports positive
//! health: a defeated creature's remaining power state is not
//! meaningful for equivalence. Mismatches are collected, never
//! short-circuited, so one pass shows every divergence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sav_state::{codec, StateError};

const DIFF_KEYS: &[&str] = &["name", "current_health", "current_block", "powers"];

/// A single disagreement between two diff records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub field: String,
    pub actual: String,
    pub expected: String,
}

impl core::fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "mismatched {}; actual:{} expected:{}",
            self.field, self.actual, self.expected
        )
    }
}

/// Compare two creature diff-encodings and return all mismatches.
pub fn diff_records(actual: &str, expected: &str) -> Result<Vec<FieldMismatch>, StateError> {
    let one = codec::parse_record(actual)?;
    let two = codec::parse_record(expected)?;
    codec::reject_unknown(&one, DIFF_KEYS)?;
    codec::reject_unknown(&two, DIFF_KEYS)?;

    let mut mismatches = Vec::new();

    let name = codec::get_str(&one, "name")?;
    let expected_name = codec::get_str(&two, "name")?;
    if name != expected_name {
        mismatches.push(FieldMismatch {
            field: "name".into(),
            actual: name,
            expected: expected_name,
        });
    }

    let health = codec::get_i32(&one, "current_health")?;
    let expected_health = codec::get_i32(&two, "current_health")?;
    if health != expected_health {
        mismatches.push(FieldMismatch {
            field: "current_health".into(),
            actual: health.to_string(),
            expected: expected_health.to_string(),
        });
    }

    let block = codec::get_i32(&one, "current_block")?;
    let expected_block = codec::get_i32(&two, "current_block")?;
    if block != expected_block {
        mismatches.push(FieldMismatch {
            field: "current_block".into(),
            actual: block.to_string(),
            expected: expected_block.to_string(),
        });
    }

    // Both power lists are validated unconditionally; a record missing
    // the key is corrupt regardless of health.
    let powers = codec::get_array(&one, "powers")?;
    let expected_powers = codec::get_array(&two, "powers")?;
    if health > 0 && powers != expected_powers {
        mismatches.push(FieldMismatch {
            field: "powers".into(),
            actual: Value::Array(powers.clone()).to_string(),
            expected: Value::Array(expected_powers.clone()).to_string(),
        });
    }

    Ok(mismatches)
}
