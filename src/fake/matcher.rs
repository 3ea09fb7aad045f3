//! Expected-vs-actual matching for administrative statement batches
//!
//! # Rules
//!
//! 1. The batches must have the same length.
//! 2. An expected entry starting with `SUB` is compared by prefix: the rest
//!    of the entry must equal the start of the actual statement.
//! 3. An expected entry without `SUB` is not compared at all.
//!
//! Tests mark the statements they care about and
//! leave the rest as placeholders.

use crate::daemon::MismatchReason;

/// Marker for an expected entry compared by prefix.
pub const PREFIX_SENTINEL: &str = "SUB";

/// Why a batch was rejected, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryListMismatch {
    /// Which rule rejected the batch
    pub reason: MismatchReason,
    /// First position that failed to match (content mismatches only)
    pub index: Option<usize>,
}

/// Build an expected entry that matches any statement starting with `prefix`.
pub fn prefix_expectation(prefix: &str) -> String {
    format!("{}{}", PREFIX_SENTINEL, prefix)
}

/// Match an actual batch against the expected one.
pub fn match_query_list(expected: &[String], actual: &[String]) -> Result<(), QueryListMismatch> {
    if expected.len() != actual.len() {
        return Err(QueryListMismatch {
            reason: MismatchReason::Size,
            index: None,
        });
    }

    match expected
        .iter()
        .zip(actual)
        .position(|(want, got)| !entry_matches(want, got))
    {
        Some(index) => Err(QueryListMismatch {
            reason: MismatchReason::Content,
            index: Some(index),
        }),
        None => Ok(()),
    }
}

fn entry_matches(expected: &str, actual: &str) -> bool {
    match expected.strip_prefix(PREFIX_SENTINEL) {
        // Byte-wise: a statement shorter than the prefix is a mismatch, not a panic.
        Some(want) => actual.as_bytes().get(..want.len()) == Some(want.as_bytes()),
        None => true,
    }
}
