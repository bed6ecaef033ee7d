//! Structured error types for the linkage HMM core.

use thiserror::Error;

/// Error raised at the boundary of every core operation.
///
/// Validation is fail-fast: a bad order, probability, shape or index is
/// reported to the caller instead of clamped or read past.
#[derive(Debug, Error, PartialEq)]
pub enum LinkageError {
    /// model order outside the supported range
    #[error("invalid model order: m={m} (supported 1..={max})")]
    InvalidModelOrder { m: usize, max: usize },

    /// recombination fraction (or other probability) outside `[0, 1]`
    #[error("invalid probability: {value}")]
    InvalidProbability { value: f64 },

    /// vector or matrix sizes inconsistent with the state count of the order
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// index referencing a position outside `p`/`q`/`g`, a pattern with bits
    /// above the order, or a recombination class above `m`
    #[error("index out of range in {what}: {index} (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LinkageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let e = LinkageError::InvalidModelOrder { m: 99, max: 10 };
        assert_eq!(e.to_string(), "invalid model order: m=99 (supported 1..=10)");
        let e = LinkageError::InvalidProbability { value: 1.5 };
        assert_eq!(e.to_string(), "invalid probability: 1.5");
        let e = LinkageError::DimensionMismatch {
            what: "ik",
            expected: 4,
            found: 3,
        };
        assert_eq!(e.to_string(), "dimension mismatch in ik: expected 4, found 3");
        let e = LinkageError::IndexOutOfRange {
            what: "p",
            index: 7,
            len: 5,
        };
        assert_eq!(e.to_string(), "index out of range in p: 7 (len 5)");
    }
}
